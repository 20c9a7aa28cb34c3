//! Error handling.

use std::path::PathBuf;

use crate::{algorithm::KeyType, key::MIN_RSA_BIT_LENGTH};

/// An error that may occur when operating on a public-key context.
///
/// Failures of the native primitives preserve the underlying diagnostic in
/// their `source` field, so that callers and logs retain the original error
/// in a human-inspectable form.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Decrypting a ciphertext failed.
    #[error("Decryption failed while {context}:\n{source}")]
    Decrypt {
        /// The context in which the error occurred.
        ///
        /// This is meant to complete the sentence "Decryption failed
        /// while ".
        context: &'static str,
        /// The source error.
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },

    /// Encrypting a message failed.
    #[error("Encryption failed while {context}:\n{source}")]
    Encrypt {
        /// The context in which the error occurred.
        ///
        /// This is meant to complete the sentence "Encryption failed
        /// while ".
        context: &'static str,
        /// The source error.
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },

    /// Reading key material from a file failed.
    #[error("Reading key material from {path} failed:\n{source}")]
    Io {
        /// The path of the unreadable file.
        path: PathBuf,
        /// The source I/O error.
        source: std::io::Error,
    },

    /// An operation was invoked on a context without loaded key material.
    #[error("No key material is loaded for {operation}")]
    NoKey {
        /// The operation that requires loaded key material.
        operation: &'static str,
    },

    /// The type of the loaded key cannot perform the requested operation.
    #[error("A {key_type} key does not support {operation}")]
    OperationUnsupported {
        /// The type of the loaded key.
        key_type: KeyType,
        /// The requested operation.
        operation: &'static str,
    },

    /// Parsing key material failed.
    ///
    /// Covers malformed bytes, unsupported encodings and missing or
    /// mismatching passphrases; the context remains without a key.
    #[error("Parsing key material failed while {context}:\n{source}")]
    Parse {
        /// The context in which the error occurred.
        ///
        /// This is meant to complete the sentence "Parsing key material
        /// failed while ".
        context: &'static str,
        /// The source error.
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },

    /// A payload exceeds the capacity of the loaded key.
    #[error("The payload length of {length} bytes exceeds the key capacity of {capacity} bytes")]
    PayloadTooLarge {
        /// The length of the rejected payload in bytes.
        length: usize,
        /// The capacity of the loaded key in bytes.
        capacity: usize,
    },

    /// A private-key operation was invoked with only a public key loaded.
    #[error("The {operation} operation requires a private key, but only a public key is loaded")]
    PrivateKeyRequired {
        /// The operation that requires a private key.
        operation: &'static str,
    },

    /// An RSA key is shorter than the supported minimum.
    #[error(
        "RSA keys shorter than {MIN_RSA_BIT_LENGTH} bit are not supported. A key length of {bit_length} is unsafe!"
    )]
    RsaKeyTooShort {
        /// The bit length of the rejected key.
        bit_length: u32,
    },

    /// Creating a signature failed.
    #[error("Signing failed while {context}:\n{source}")]
    Sign {
        /// The context in which the error occurred.
        ///
        /// This is meant to complete the sentence "Signing failed while ".
        context: &'static str,
        /// The source error.
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },

    /// A signature could not be checked against a message.
    ///
    /// This is an operational failure, such as a signature that is not in
    /// the expected format at all. A well-formed signature that simply does
    /// not match the message is not an error but reported as
    /// [`VerifyOutcome::Mismatch`](crate::VerifyOutcome::Mismatch).
    #[error("Verification failed while {context}:\n{source}")]
    Verify {
        /// The context in which the error occurred.
        ///
        /// This is meant to complete the sentence "Verification failed
        /// while ".
        context: &'static str,
        /// The source error.
        source: Box<dyn std::error::Error + 'static + Send + Sync>,
    },
}
