//! A library for public-key cryptographic operations over parsed key material.
//!
//! Provides [`PkContext`], a context that owns at most one parsed key together with a
//! [`RandomSource`] and drives the classic public-key operations: signing, verification,
//! encryption and decryption. Keys are parsed from bytes or files, with the key type
//! inferred from the material.
//!
//! # Key types and capabilities
//!
//! Supported key types are RSA (2048 bit and up, see [`MIN_RSA_BIT_LENGTH`]), Curve25519
//! (Ed25519 signatures) and the NIST curves P-256, P-384 and P-521 (ECDSA signatures).
//! RSA keys support all four operations, the curve types sign and verify only.
//! The static capability registry is exposed through [`describe`], which returns an
//! [`AlgorithmDescriptor`] for each [`KeyType`].
//!
//! # Key formats
//!
//! Private keys are accepted as PKCS#8 documents (plain or PBES2-encrypted, the latter
//! unlocked with a [`Passphrase`]) for all key types and as PKCS#1 documents for RSA.
//! Public keys are accepted as SPKI documents for all key types and as PKCS#1 documents
//! for RSA. All formats are understood in PEM and DER encoding.
//!
//! # Message preparation
//!
//! The sign and verify operations digest their message with a [`HashAlgorithm`] before
//! the native primitive runs. With [`HashAlgorithm::None`] the raw message is processed
//! instead, which requires it to be shorter than the capacity of the loaded key (its
//! size in bytes, see [`PkContext::key_size_bytes`]). The encrypt and decrypt operations
//! accept payloads up to and including the capacity.
//!
//! # Examples
//!
//! ```
//! use pkops::{HashAlgorithm, KeyType, PkContext, VerifyOutcome};
//!
//! # fn main() -> testresult::TestResult {
//! let pem = include_bytes!(concat!(
//!     env!("CARGO_MANIFEST_DIR"),
//!     "/tests/fixtures/rsa2048.pkcs8.pem"
//! ));
//!
//! // Load a private key; the key type is inferred from the material.
//! let mut context = PkContext::new();
//! context.parse_private_key(pem, None)?;
//! assert_eq!(context.key_type(), KeyType::Rsa);
//! assert_eq!(context.key_size_bits(), 2048);
//!
//! // Sign a message and verify the signature.
//! let message = b"important message";
//! let signature = context.sign(message, HashAlgorithm::Sha256)?;
//! assert_eq!(
//!     context.verify(message, &signature, HashAlgorithm::Sha256)?,
//!     VerifyOutcome::Valid
//! );
//! assert_eq!(
//!     context.verify(b"tampered message", &signature, HashAlgorithm::Sha256)?,
//!     VerifyOutcome::Mismatch
//! );
//!
//! // Encrypt a message and decrypt the ciphertext.
//! let ciphertext = context.encrypt(b"a secret")?;
//! assert_eq!(context.decrypt(&ciphertext)?, b"a secret");
//! # Ok(())
//! # }
//! ```

mod algorithm;
mod context;
mod error;
mod hash;
mod key;
mod passphrase;
mod prepare;
mod random;

pub use algorithm::{AlgorithmDescriptor, KeyType, describe};
pub use context::{PkContext, VerifyOutcome};
pub use error::Error;
pub use hash::HashAlgorithm;
pub use key::MIN_RSA_BIT_LENGTH;
pub use passphrase::Passphrase;
pub use random::RandomSource;
