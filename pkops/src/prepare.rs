//! Message preparation for key operations.
//!
//! Sign and verify consume digest-sized input. [`prepare`] decides per call
//! whether a message is digested first or passed through unchanged, and
//! [`check_size`] guards cipher payloads against the capacity of the loaded
//! key.

use std::borrow::Cow;

use crate::{Error, HashAlgorithm};

/// Prepares `message` for a sign or verify call against a key of
/// `capacity` bytes.
///
/// With a real hash algorithm the digest of `message` is returned. With
/// [`HashAlgorithm::None`] the message is treated as already digest-sized
/// and returned unchanged, as long as it is strictly shorter than
/// `capacity`; a message at or above `capacity` has no digest to fall back
/// to and is rejected as [`Error::PayloadTooLarge`].
pub(crate) fn prepare<'a>(
    message: &'a [u8],
    hash: HashAlgorithm,
    capacity: usize,
) -> Result<Cow<'a, [u8]>, Error> {
    match hash.compute(message) {
        Some(digest) => Ok(Cow::Owned(digest)),
        None if message.len() < capacity => Ok(Cow::Borrowed(message)),
        None => Err(Error::PayloadTooLarge {
            length: message.len(),
            capacity,
        }),
    }
}

/// Ensures `data` fits into one operation of a key of `capacity` bytes.
pub(crate) fn check_size(data: &[u8], capacity: usize) -> Result<(), Error> {
    if data.len() <= capacity {
        Ok(())
    } else {
        Err(Error::PayloadTooLarge {
            length: data.len(),
            capacity,
        })
    }
}
