//! Hash algorithms used for message preparation.

use digest::Digest;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The hash algorithm used to prepare a message for a key operation
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum HashAlgorithm {
    /// The MD-5 hash algorithm
    Md5,

    /// The absence of a hash algorithm
    ///
    /// Marks a message as already digest-sized: it is used directly,
    /// without prior digestion, as long as it fits the capacity of the
    /// loaded key.
    #[default]
    None,

    /// The SHA-1 hash algorithm
    Sha1,

    /// The SHA-224 hash algorithm
    Sha224,

    /// The SHA-256 hash algorithm
    Sha256,

    /// The SHA-384 hash algorithm
    Sha384,

    /// The SHA-512 hash algorithm
    Sha512,
}

impl HashAlgorithm {
    /// Computes the digest of `data`.
    ///
    /// Returns [`None`] for [`HashAlgorithm::None`], which provides no
    /// digest of its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use pkops::HashAlgorithm;
    ///
    /// let digest = HashAlgorithm::Sha256.compute(b"data");
    /// assert_eq!(digest.map(|digest| digest.len()), Some(32));
    ///
    /// assert!(HashAlgorithm::None.compute(b"data").is_none());
    /// ```
    pub fn compute(self, data: &[u8]) -> Option<Vec<u8>> {
        match self {
            HashAlgorithm::Md5 => Some(Md5::digest(data).to_vec()),
            HashAlgorithm::None => None,
            HashAlgorithm::Sha1 => Some(Sha1::digest(data).to_vec()),
            HashAlgorithm::Sha224 => Some(Sha224::digest(data).to_vec()),
            HashAlgorithm::Sha256 => Some(Sha256::digest(data).to_vec()),
            HashAlgorithm::Sha384 => Some(Sha384::digest(data).to_vec()),
            HashAlgorithm::Sha512 => Some(Sha512::digest(data).to_vec()),
        }
    }
}
