//! Parsed key material and the parsers filling a context.
//!
//! Accepted private key encodings are PKCS#8 (plain and PBES2-encrypted)
//! for all key types and PKCS#1 for RSA; accepted public key encodings are
//! SPKI for all key types and PKCS#1 for RSA. PEM and DER are both
//! understood, PEM by its label and DER by the embedded algorithm
//! identifier.

use std::fmt;

use ed25519_dalek::pkcs8::{KeypairBytes, PublicKeyBytes};
use log::{error, warn};
use pkcs8::{
    EncryptedPrivateKeyInfo,
    PrivateKeyInfo,
    der::{Document, SecretDocument, asn1::ObjectIdentifier},
    spki::SubjectPublicKeyInfoRef,
};
use rsa::{
    RsaPrivateKey,
    RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    traits::PublicKeyParts,
};

use crate::{Error, KeyType, Passphrase};

/// The minimum bit length for an RSA key
///
/// This follows recommendations from [NIST Special Publication 800-57 Part 3 Revision 1](https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-57Pt3r1.pdf) (January 2015).
pub const MIN_RSA_BIT_LENGTH: u32 = 2048;

/// A parsed key, private or public, of one of the supported types.
///
/// The native key values are boxed to keep the enum small. The private key
/// values zeroize on drop through their implementations.
pub(crate) enum PkKey {
    RsaPrivate(Box<RsaPrivateKey>),
    RsaPublic(Box<RsaPublicKey>),
    Ed25519Private(Box<ed25519_dalek::SigningKey>),
    Ed25519Public(Box<ed25519_dalek::VerifyingKey>),
    EcP256Private(Box<p256::ecdsa::SigningKey>),
    EcP256Public(Box<p256::ecdsa::VerifyingKey>),
    EcP384Private(Box<p384::ecdsa::SigningKey>),
    EcP384Public(Box<p384::ecdsa::VerifyingKey>),
    EcP521Private(Box<p521::ecdsa::SigningKey>),
    EcP521Public(Box<p521::ecdsa::VerifyingKey>),
}

impl PkKey {
    /// Returns the [`KeyType`] of the key.
    pub(crate) fn key_type(&self) -> KeyType {
        match self {
            PkKey::RsaPrivate(_) | PkKey::RsaPublic(_) => KeyType::Rsa,
            PkKey::Ed25519Private(_) | PkKey::Ed25519Public(_) => KeyType::Curve25519,
            PkKey::EcP256Private(_) | PkKey::EcP256Public(_) => KeyType::EcP256,
            PkKey::EcP384Private(_) | PkKey::EcP384Public(_) => KeyType::EcP384,
            PkKey::EcP521Private(_) | PkKey::EcP521Public(_) => KeyType::EcP521,
        }
    }

    /// Returns whether the key carries the private part.
    pub(crate) fn is_private(&self) -> bool {
        matches!(
            self,
            PkKey::RsaPrivate(_)
                | PkKey::Ed25519Private(_)
                | PkKey::EcP256Private(_)
                | PkKey::EcP384Private(_)
                | PkKey::EcP521Private(_)
        )
    }

    /// Returns the key size in bits.
    pub(crate) fn size_bits(&self) -> usize {
        match self {
            PkKey::RsaPrivate(key) => key.size() * 8,
            PkKey::RsaPublic(key) => key.size() * 8,
            PkKey::Ed25519Private(_) | PkKey::Ed25519Public(_) => 256,
            PkKey::EcP256Private(_) | PkKey::EcP256Public(_) => 256,
            PkKey::EcP384Private(_) | PkKey::EcP384Public(_) => 384,
            PkKey::EcP521Private(_) | PkKey::EcP521Public(_) => 521,
        }
    }

    /// Returns the key size in bytes.
    ///
    /// This doubles as the capacity of the key: the maximum number of bytes
    /// one sign or encrypt call can process.
    pub(crate) fn size_bytes(&self) -> usize {
        match self {
            PkKey::RsaPrivate(key) => key.size(),
            PkKey::RsaPublic(key) => key.size(),
            PkKey::Ed25519Private(_) | PkKey::Ed25519Public(_) => 32,
            PkKey::EcP256Private(_) | PkKey::EcP256Public(_) => 32,
            PkKey::EcP384Private(_) | PkKey::EcP384Public(_) => 48,
            PkKey::EcP521Private(_) | PkKey::EcP521Public(_) => 66,
        }
    }
}

// Key material stays out of debug output.
impl fmt::Debug for PkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            PkKey::RsaPrivate(_) => "RsaPrivate",
            PkKey::RsaPublic(_) => "RsaPublic",
            PkKey::Ed25519Private(_) => "Ed25519Private",
            PkKey::Ed25519Public(_) => "Ed25519Public",
            PkKey::EcP256Private(_) => "EcP256Private",
            PkKey::EcP256Public(_) => "EcP256Public",
            PkKey::EcP384Private(_) => "EcP384Private",
            PkKey::EcP384Public(_) => "EcP384Public",
            PkKey::EcP521Private(_) => "EcP521Private",
            PkKey::EcP521Public(_) => "EcP521Public",
        };
        write!(f, "PkKey::{variant}([REDACTED])")
    }
}

/// Structural problems in presented key material that have no native
/// source error of their own.
#[derive(Debug, thiserror::Error)]
pub(crate) enum MaterialError {
    /// The PEM label is not a supported key envelope.
    #[error("The PEM label {label:?} is not a supported key envelope")]
    UnsupportedPemLabel {
        /// The label found in the PEM document.
        label: String,
    },

    /// Encrypted key material was presented without a passphrase.
    #[error("The key material is encrypted but no passphrase was supplied")]
    PassphraseRequired,

    /// The named elliptic curve is not supported.
    #[error("The named elliptic curve {oid} is not supported")]
    UnsupportedEcCurve {
        /// The object identifier of the named curve.
        oid: ObjectIdentifier,
    },

    /// The key algorithm is not supported.
    #[error("The key algorithm {oid} is not supported")]
    UnsupportedAlgorithm {
        /// The object identifier of the key algorithm.
        oid: ObjectIdentifier,
    },
}

fn parse_error(
    context: &'static str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> Error {
    error!("Parsing key material failed while {context}: {source:?}");
    Error::Parse {
        context,
        source: Box::new(source),
    }
}

/// Returns `material` as PEM text if it looks like a PEM document.
fn pem_text(material: &[u8]) -> Result<Option<&str>, Error> {
    if !material.trim_ascii_start().starts_with(b"-----BEGIN ") {
        return Ok(None);
    }
    std::str::from_utf8(material)
        .map(Some)
        .map_err(|source| parse_error("decoding PEM text", source))
}

fn warn_unused_passphrase(passphrase: Option<&Passphrase>) {
    if passphrase.is_some() {
        warn!("A passphrase was supplied but the key material is not encrypted; ignoring it");
    }
}

/// Parses private key material into a [`PkKey`].
///
/// The key type is inferred from the material. `passphrase` is required for
/// encrypted PKCS#8 input and ignored (with a warning) for all other input.
pub(crate) fn parse_private(
    material: &[u8],
    passphrase: Option<&Passphrase>,
) -> Result<PkKey, Error> {
    if let Some(pem) = pem_text(material)? {
        let (label, document) = SecretDocument::from_pem(pem)
            .map_err(|source| parse_error("reading a PEM document", source))?;
        match label {
            "PRIVATE KEY" => {
                warn_unused_passphrase(passphrase);
                let info = PrivateKeyInfo::try_from(document.as_bytes())
                    .map_err(|source| parse_error("reading a PKCS#8 private key", source))?;
                private_from_key_info(info)
            }
            "ENCRYPTED PRIVATE KEY" => {
                let encrypted = EncryptedPrivateKeyInfo::try_from(document.as_bytes())
                    .map_err(|source| {
                        parse_error("reading an encrypted PKCS#8 private key", source)
                    })?;
                decrypt_private(encrypted, passphrase)
            }
            "RSA PRIVATE KEY" => {
                warn_unused_passphrase(passphrase);
                let private_key = RsaPrivateKey::from_pkcs1_der(document.as_bytes())
                    .map_err(|source| parse_error("reading a PKCS#1 RSA private key", source))?;
                rsa_private_checked(private_key)
            }
            _ => Err(parse_error(
                "reading a PEM document",
                MaterialError::UnsupportedPemLabel {
                    label: label.to_string(),
                },
            )),
        }
    } else {
        parse_private_der(material, passphrase)
    }
}

/// Parses public key material into a [`PkKey`].
pub(crate) fn parse_public(material: &[u8]) -> Result<PkKey, Error> {
    if let Some(pem) = pem_text(material)? {
        let (label, document) = Document::from_pem(pem)
            .map_err(|source| parse_error("reading a PEM document", source))?;
        match label {
            "PUBLIC KEY" => {
                let info = SubjectPublicKeyInfoRef::try_from(document.as_bytes())
                    .map_err(|source| parse_error("reading an SPKI public key", source))?;
                public_from_spki(info)
            }
            "RSA PUBLIC KEY" => {
                let public_key = RsaPublicKey::from_pkcs1_der(document.as_bytes())
                    .map_err(|source| parse_error("reading a PKCS#1 RSA public key", source))?;
                rsa_public_checked(public_key)
            }
            _ => Err(parse_error(
                "reading a PEM document",
                MaterialError::UnsupportedPemLabel {
                    label: label.to_string(),
                },
            )),
        }
    } else {
        match SubjectPublicKeyInfoRef::try_from(material) {
            Ok(info) => public_from_spki(info),
            Err(spki_error) => {
                if let Ok(public_key) = RsaPublicKey::from_pkcs1_der(material) {
                    return rsa_public_checked(public_key);
                }
                Err(parse_error(
                    "reading a DER public key document",
                    spki_error,
                ))
            }
        }
    }
}

/// Parses a DER private key document, trying PKCS#8, encrypted PKCS#8 and
/// PKCS#1 in that order.
fn parse_private_der(der: &[u8], passphrase: Option<&Passphrase>) -> Result<PkKey, Error> {
    match PrivateKeyInfo::try_from(der) {
        Ok(info) => {
            warn_unused_passphrase(passphrase);
            private_from_key_info(info)
        }
        Err(pkcs8_error) => {
            if let Ok(encrypted) = EncryptedPrivateKeyInfo::try_from(der) {
                return decrypt_private(encrypted, passphrase);
            }
            if let Ok(private_key) = RsaPrivateKey::from_pkcs1_der(der) {
                warn_unused_passphrase(passphrase);
                return rsa_private_checked(private_key);
            }
            Err(parse_error(
                "reading a DER private key document",
                pkcs8_error,
            ))
        }
    }
}

/// Decrypts an encrypted PKCS#8 document and parses the contained key.
fn decrypt_private(
    encrypted: EncryptedPrivateKeyInfo<'_>,
    passphrase: Option<&Passphrase>,
) -> Result<PkKey, Error> {
    let Some(passphrase) = passphrase else {
        return Err(parse_error(
            "decrypting a PKCS#8 private key",
            MaterialError::PassphraseRequired,
        ));
    };
    let document = encrypted
        .decrypt(passphrase.expose_borrowed())
        .map_err(|source| parse_error("decrypting a PKCS#8 private key", source))?;
    let info = PrivateKeyInfo::try_from(document.as_bytes())
        .map_err(|source| parse_error("reading a decrypted PKCS#8 private key", source))?;
    private_from_key_info(info)
}

/// Dispatches a PKCS#8 private key on its algorithm identifier.
fn private_from_key_info(info: PrivateKeyInfo<'_>) -> Result<PkKey, Error> {
    let oid = info.algorithm.oid;
    if oid == rsa::pkcs1::ALGORITHM_OID {
        let private_key = RsaPrivateKey::try_from(info)
            .map_err(|source| parse_error("reading an RSA private key", source))?;
        return rsa_private_checked(private_key);
    }
    if oid == ed25519_dalek::pkcs8::ALGORITHM_OID {
        let keypair = KeypairBytes::try_from(info)
            .map_err(|source| parse_error("reading a Curve25519 private key", source))?;
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&keypair.secret_key);
        return Ok(PkKey::Ed25519Private(Box::new(signing_key)));
    }
    if oid == p256::elliptic_curve::ALGORITHM_OID {
        let curve = info
            .algorithm
            .parameters_oid()
            .map_err(|source| parse_error("reading the named curve of a private key", source))?;
        if let Ok(signing_key) = p256::ecdsa::SigningKey::try_from(info.clone()) {
            return Ok(PkKey::EcP256Private(Box::new(signing_key)));
        }
        if let Ok(signing_key) = p384::ecdsa::SigningKey::try_from(info.clone()) {
            return Ok(PkKey::EcP384Private(Box::new(signing_key)));
        }
        if let Ok(signing_key) = p521::ecdsa::SigningKey::try_from(info) {
            return Ok(PkKey::EcP521Private(Box::new(signing_key)));
        }
        return Err(parse_error(
            "reading an elliptic curve private key",
            MaterialError::UnsupportedEcCurve { oid: curve },
        ));
    }
    Err(parse_error(
        "identifying the key algorithm",
        MaterialError::UnsupportedAlgorithm { oid },
    ))
}

/// Dispatches an SPKI public key on its algorithm identifier.
fn public_from_spki(info: SubjectPublicKeyInfoRef<'_>) -> Result<PkKey, Error> {
    let oid = info.algorithm.oid;
    if oid == rsa::pkcs1::ALGORITHM_OID {
        let public_key = RsaPublicKey::try_from(info)
            .map_err(|source| parse_error("reading an RSA public key", source))?;
        return rsa_public_checked(public_key);
    }
    if oid == ed25519_dalek::pkcs8::ALGORITHM_OID {
        let public_key_bytes = PublicKeyBytes::try_from(info)
            .map_err(|source| parse_error("reading a Curve25519 public key", source))?;
        let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&public_key_bytes.0)
            .map_err(|source| parse_error("validating a Curve25519 public key", source))?;
        return Ok(PkKey::Ed25519Public(Box::new(verifying_key)));
    }
    if oid == p256::elliptic_curve::ALGORITHM_OID {
        let curve = info
            .algorithm
            .parameters_oid()
            .map_err(|source| parse_error("reading the named curve of a public key", source))?;
        if let Ok(verifying_key) = p256::ecdsa::VerifyingKey::try_from(info.clone()) {
            return Ok(PkKey::EcP256Public(Box::new(verifying_key)));
        }
        if let Ok(verifying_key) = p384::ecdsa::VerifyingKey::try_from(info.clone()) {
            return Ok(PkKey::EcP384Public(Box::new(verifying_key)));
        }
        if let Ok(verifying_key) = p521::ecdsa::VerifyingKey::try_from(info) {
            return Ok(PkKey::EcP521Public(Box::new(verifying_key)));
        }
        return Err(parse_error(
            "reading an elliptic curve public key",
            MaterialError::UnsupportedEcCurve { oid: curve },
        ));
    }
    Err(parse_error(
        "identifying the key algorithm",
        MaterialError::UnsupportedAlgorithm { oid },
    ))
}

fn check_rsa_bit_length(bit_length: u32) -> Result<(), Error> {
    if bit_length < MIN_RSA_BIT_LENGTH {
        return Err(Error::RsaKeyTooShort { bit_length });
    }
    Ok(())
}

fn rsa_private_checked(private_key: RsaPrivateKey) -> Result<PkKey, Error> {
    check_rsa_bit_length(private_key.size() as u32 * 8)?;
    Ok(PkKey::RsaPrivate(Box::new(private_key)))
}

fn rsa_public_checked(public_key: RsaPublicKey) -> Result<PkKey, Error> {
    check_rsa_bit_length(public_key.size() as u32 * 8)?;
    Ok(PkKey::RsaPublic(Box::new(public_key)))
}
