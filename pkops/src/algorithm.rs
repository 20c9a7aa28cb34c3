//! Key algorithms and the algorithm registry.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The algorithm type of a key
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
pub enum KeyType {
    /// A Montgomery curve key over a prime field for the prime number 2^255-19
    Curve25519,

    /// An elliptic-curve key over a prime field for a prime of size 256 bit
    EcP256,

    /// An elliptic-curve key over a prime field for a prime of size 384 bit
    EcP384,

    /// An elliptic-curve key over a prime field for a prime of size 521 bit
    EcP521,

    /// The absence of a key
    ///
    /// This is the sentinel type of a context that holds no key material.
    #[default]
    None,

    /// An RSA key
    Rsa,
}

/// The capabilities of a key algorithm.
///
/// Returned by [`describe`] and by
/// [`PkContext::algorithm`](crate::PkContext::algorithm). A descriptor
/// tells which of the four operations keys of a type support, independent
/// of any parsed key material.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AlgorithmDescriptor {
    key_type: KeyType,
    can_sign: bool,
    can_verify: bool,
    can_encrypt: bool,
    can_decrypt: bool,
}

impl AlgorithmDescriptor {
    /// Returns the key type the descriptor describes.
    pub const fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Returns whether keys of this type can create signatures.
    pub const fn can_sign(&self) -> bool {
        self.can_sign
    }

    /// Returns whether keys of this type can verify signatures.
    pub const fn can_verify(&self) -> bool {
        self.can_verify
    }

    /// Returns whether keys of this type can encrypt messages.
    pub const fn can_encrypt(&self) -> bool {
        self.can_encrypt
    }

    /// Returns whether keys of this type can decrypt ciphertexts.
    pub const fn can_decrypt(&self) -> bool {
        self.can_decrypt
    }
}

/// Returns the [`AlgorithmDescriptor`] for a [`KeyType`].
///
/// The sentinel [`KeyType::None`] carries no capabilities at all.
///
/// # Examples
///
/// ```
/// use pkops::{KeyType, describe};
///
/// assert!(describe(KeyType::Rsa).can_encrypt());
/// assert!(describe(KeyType::Curve25519).can_sign());
///
/// // signature-only key types have no cipher capabilities
/// assert!(!describe(KeyType::Curve25519).can_encrypt());
/// assert!(!describe(KeyType::EcP521).can_decrypt());
///
/// // the sentinel can do nothing
/// assert!(!describe(KeyType::None).can_verify());
/// ```
pub const fn describe(key_type: KeyType) -> AlgorithmDescriptor {
    match key_type {
        KeyType::None => AlgorithmDescriptor {
            key_type,
            can_sign: false,
            can_verify: false,
            can_encrypt: false,
            can_decrypt: false,
        },
        KeyType::Rsa => AlgorithmDescriptor {
            key_type,
            can_sign: true,
            can_verify: true,
            can_encrypt: true,
            can_decrypt: true,
        },
        KeyType::Curve25519 | KeyType::EcP256 | KeyType::EcP384 | KeyType::EcP521 => {
            AlgorithmDescriptor {
                key_type,
                can_sign: true,
                can_verify: true,
                can_encrypt: false,
                can_decrypt: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use strum::IntoEnumIterator;
    use testresult::TestResult;

    use super::*;

    #[rstest]
    #[case(KeyType::Curve25519, true, true, false, false)]
    #[case(KeyType::EcP256, true, true, false, false)]
    #[case(KeyType::EcP384, true, true, false, false)]
    #[case(KeyType::EcP521, true, true, false, false)]
    #[case(KeyType::None, false, false, false, false)]
    #[case(KeyType::Rsa, true, true, true, true)]
    fn describe_capabilities(
        #[case] key_type: KeyType,
        #[case] can_sign: bool,
        #[case] can_verify: bool,
        #[case] can_encrypt: bool,
        #[case] can_decrypt: bool,
    ) {
        let descriptor = describe(key_type);
        assert_eq!(descriptor.key_type(), key_type);
        assert_eq!(descriptor.can_sign(), can_sign);
        assert_eq!(descriptor.can_verify(), can_verify);
        assert_eq!(descriptor.can_encrypt(), can_encrypt);
        assert_eq!(descriptor.can_decrypt(), can_decrypt);
    }

    #[test]
    fn key_type_string_round_trip() -> TestResult {
        for key_type in KeyType::iter() {
            let name: &'static str = key_type.into();
            assert_eq!(KeyType::from_str(name)?, key_type);
            assert_eq!(KeyType::from_str(&name.to_lowercase())?, key_type);
            assert_eq!(format!("{key_type}"), name);
        }
        Ok(())
    }

    #[test]
    fn key_type_default_is_sentinel() {
        assert_eq!(KeyType::default(), KeyType::None);
    }
}
