//! Tests for loading key material from bytes and files.

use std::fs;

use pkops::{Error, KeyType, MIN_RSA_BIT_LENGTH, Passphrase, PkContext};
use rstest::rstest;
use testdir::testdir;
use testresult::TestResult;

pub static PASSPHRASE: &str = "correct-horse";

const RSA_PRIVATE_PEM: &[u8] = include_bytes!("fixtures/rsa2048.pkcs8.pem");
const RSA_PRIVATE_DER: &[u8] = include_bytes!("fixtures/rsa2048.pkcs8.der");
const RSA_PRIVATE_PKCS1_PEM: &[u8] = include_bytes!("fixtures/rsa2048.pkcs1.pem");
const RSA_PRIVATE_PKCS1_DER: &[u8] = include_bytes!("fixtures/rsa2048.pkcs1.der");
const RSA_ENCRYPTED_PEM: &[u8] = include_bytes!("fixtures/rsa2048.pkcs8.enc.pem");
const RSA_ENCRYPTED_DER: &[u8] = include_bytes!("fixtures/rsa2048.pkcs8.enc.der");
const RSA_SHORT_PEM: &[u8] = include_bytes!("fixtures/rsa1024.pkcs8.pem");
const RSA_PUBLIC_PEM: &[u8] = include_bytes!("fixtures/rsa2048.spki.pem");
const RSA_PUBLIC_DER: &[u8] = include_bytes!("fixtures/rsa2048.spki.der");
const RSA_PUBLIC_PKCS1_PEM: &[u8] = include_bytes!("fixtures/rsa2048.pkcs1.pub.pem");
const ED25519_PRIVATE_PEM: &[u8] = include_bytes!("fixtures/ed25519.pkcs8.pem");
const ED25519_PRIVATE_DER: &[u8] = include_bytes!("fixtures/ed25519.pkcs8.der");
const ED25519_ENCRYPTED_PEM: &[u8] = include_bytes!("fixtures/ed25519.pkcs8.enc.pem");
const ED25519_PUBLIC_PEM: &[u8] = include_bytes!("fixtures/ed25519.spki.pem");
const P256_PRIVATE_PEM: &[u8] = include_bytes!("fixtures/p256.pkcs8.pem");
const P256_PUBLIC_PEM: &[u8] = include_bytes!("fixtures/p256.spki.pem");
const P384_PRIVATE_PEM: &[u8] = include_bytes!("fixtures/p384.pkcs8.pem");
const P384_PUBLIC_PEM: &[u8] = include_bytes!("fixtures/p384.spki.pem");
const P521_PRIVATE_PEM: &[u8] = include_bytes!("fixtures/p521.pkcs8.pem");
const P521_PUBLIC_PEM: &[u8] = include_bytes!("fixtures/p521.spki.pem");
const GARBAGE: &[u8] = include_bytes!("fixtures/garbage.bin");
const TRUNCATED_PEM: &[u8] = include_bytes!("fixtures/truncated.pem");

#[rstest]
#[case::rsa_pkcs8_pem(RSA_PRIVATE_PEM, KeyType::Rsa, 2048, 256)]
#[case::rsa_pkcs8_der(RSA_PRIVATE_DER, KeyType::Rsa, 2048, 256)]
#[case::rsa_pkcs1_pem(RSA_PRIVATE_PKCS1_PEM, KeyType::Rsa, 2048, 256)]
#[case::rsa_pkcs1_der(RSA_PRIVATE_PKCS1_DER, KeyType::Rsa, 2048, 256)]
#[case::ed25519_pkcs8_pem(ED25519_PRIVATE_PEM, KeyType::Curve25519, 256, 32)]
#[case::ed25519_pkcs8_der(ED25519_PRIVATE_DER, KeyType::Curve25519, 256, 32)]
#[case::p256_pkcs8_pem(P256_PRIVATE_PEM, KeyType::EcP256, 256, 32)]
#[case::p384_pkcs8_pem(P384_PRIVATE_PEM, KeyType::EcP384, 384, 48)]
#[case::p521_pkcs8_pem(P521_PRIVATE_PEM, KeyType::EcP521, 521, 66)]
fn load_private_keys_of_all_types_and_formats(
    #[case] material: &[u8],
    #[case] key_type: KeyType,
    #[case] bits: usize,
    #[case] bytes: usize,
) -> TestResult {
    let mut context = PkContext::new();
    context.parse_private_key(material, None)?;
    assert!(context.is_valid());
    assert_eq!(context.key_type(), key_type);
    assert_eq!(context.key_size_bits(), bits);
    assert_eq!(context.key_size_bytes(), bytes);
    assert!(context.can_do(key_type));
    Ok(())
}

#[rstest]
#[case::rsa_spki_pem(RSA_PUBLIC_PEM, KeyType::Rsa, 256)]
#[case::rsa_spki_der(RSA_PUBLIC_DER, KeyType::Rsa, 256)]
#[case::rsa_pkcs1_pem(RSA_PUBLIC_PKCS1_PEM, KeyType::Rsa, 256)]
#[case::ed25519_spki_pem(ED25519_PUBLIC_PEM, KeyType::Curve25519, 32)]
#[case::p256_spki_pem(P256_PUBLIC_PEM, KeyType::EcP256, 32)]
#[case::p384_spki_pem(P384_PUBLIC_PEM, KeyType::EcP384, 48)]
#[case::p521_spki_pem(P521_PUBLIC_PEM, KeyType::EcP521, 66)]
fn load_public_keys_of_all_types_and_formats(
    #[case] material: &[u8],
    #[case] key_type: KeyType,
    #[case] bytes: usize,
) -> TestResult {
    let mut context = PkContext::new();
    context.parse_public_key(material)?;
    assert!(context.is_valid());
    assert_eq!(context.key_type(), key_type);
    assert_eq!(context.key_size_bytes(), bytes);
    Ok(())
}

#[rstest]
#[case::rsa_pem(RSA_ENCRYPTED_PEM, KeyType::Rsa)]
#[case::rsa_der(RSA_ENCRYPTED_DER, KeyType::Rsa)]
#[case::ed25519_pem(ED25519_ENCRYPTED_PEM, KeyType::Curve25519)]
fn load_encrypted_private_keys(
    #[case] material: &[u8],
    #[case] key_type: KeyType,
) -> TestResult {
    let mut context = PkContext::new();
    context.parse_private_key(material, Some(&Passphrase::new(PASSPHRASE.to_string())))?;
    assert!(context.is_valid());
    assert_eq!(context.key_type(), key_type);
    Ok(())
}

#[test]
fn encrypted_key_requires_a_passphrase() {
    let mut context = PkContext::new();
    let result = context.parse_private_key(RSA_ENCRYPTED_PEM, None);
    assert!(matches!(result, Err(Error::Parse { .. })));
    assert!(!context.is_valid());
}

#[test]
fn encrypted_key_rejects_a_wrong_passphrase() {
    let mut context = PkContext::new();
    let result = context.parse_private_key(
        RSA_ENCRYPTED_PEM,
        Some(&Passphrase::new("wrong-horse".to_string())),
    );
    assert!(matches!(result, Err(Error::Parse { .. })));
    assert!(!context.is_valid());
}

#[test]
fn plain_key_loads_despite_a_passphrase() -> TestResult {
    let mut context = PkContext::new();
    context.parse_private_key(
        RSA_PRIVATE_PEM,
        Some(&Passphrase::new("unused".to_string())),
    )?;
    assert!(context.is_valid());
    Ok(())
}

#[test]
fn short_rsa_key_is_rejected() {
    let mut context = PkContext::new();
    let error = context
        .parse_private_key(RSA_SHORT_PEM, None)
        .expect_err("a 1024 bit RSA key must be rejected");
    assert!(matches!(error, Error::RsaKeyTooShort { bit_length: 1024 }));
    assert!(error.to_string().contains(&MIN_RSA_BIT_LENGTH.to_string()));
    assert!(!context.is_valid());
}

#[rstest]
#[case::garbage(GARBAGE)]
#[case::truncated_pem(TRUNCATED_PEM)]
#[case::empty(b"")]
#[case::public_material(RSA_PUBLIC_PEM)]
fn invalid_private_material_is_rejected(#[case] material: &[u8]) {
    let mut context = PkContext::new();
    let result = context.parse_private_key(material, None);
    assert!(matches!(result, Err(Error::Parse { .. })));
    assert!(!context.is_valid());
}

#[rstest]
#[case::garbage(GARBAGE)]
#[case::empty(b"")]
#[case::private_material(ED25519_PRIVATE_PEM)]
fn invalid_public_material_is_rejected(#[case] material: &[u8]) {
    let mut context = PkContext::new();
    let result = context.parse_public_key(material);
    assert!(matches!(result, Err(Error::Parse { .. })));
    assert!(!context.is_valid());
}

#[test]
fn private_key_file_loads() -> TestResult {
    let dir = testdir!();
    let path = dir.join("key.pem");
    fs::write(&path, RSA_PRIVATE_PEM)?;

    let mut context = PkContext::new();
    context.parse_private_key_file(&path, None)?;
    assert!(context.is_valid());
    assert_eq!(context.key_type(), KeyType::Rsa);
    Ok(())
}

#[test]
fn encrypted_private_key_file_loads() -> TestResult {
    let dir = testdir!();
    let path = dir.join("key.enc.pem");
    fs::write(&path, RSA_ENCRYPTED_PEM)?;

    let mut context = PkContext::new();
    context.parse_private_key_file(&path, Some(&Passphrase::new(PASSPHRASE.to_string())))?;
    assert!(context.is_valid());
    Ok(())
}

#[test]
fn public_key_file_loads() -> TestResult {
    let dir = testdir!();
    let path = dir.join("key.pub.pem");
    fs::write(&path, ED25519_PUBLIC_PEM)?;

    let mut context = PkContext::new();
    context.parse_public_key_file(&path)?;
    assert!(context.is_valid());
    assert_eq!(context.key_type(), KeyType::Curve25519);
    Ok(())
}

#[test]
fn missing_file_reports_its_path() {
    let dir = testdir!();
    let path = dir.join("no-such-key.pem");

    let mut context = PkContext::new();
    let error = context
        .parse_private_key_file(&path, None)
        .expect_err("reading a missing file must fail");
    match error {
        Error::Io {
            path: reported,
            source,
        } => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        error => panic!("expected an I/O error, got {error}"),
    }
    assert!(!context.is_valid());
}

#[test]
fn failed_file_load_invalidates_the_context() -> TestResult {
    let dir = testdir!();
    let mut context = PkContext::new();
    context.parse_private_key(RSA_PRIVATE_PEM, None)?;
    assert!(context.is_valid());

    assert!(
        context
            .parse_private_key_file(dir.join("absent.pem"), None)
            .is_err()
    );
    assert!(!context.is_valid());
    assert_eq!(context.key_type(), KeyType::None);
    Ok(())
}

#[test]
fn context_recovers_after_a_failed_load() -> TestResult {
    let mut context = PkContext::new();
    assert!(context.parse_private_key(GARBAGE, None).is_err());
    assert!(!context.is_valid());

    context.parse_private_key(ED25519_PRIVATE_PEM, None)?;
    assert!(context.is_valid());
    assert_eq!(context.key_type(), KeyType::Curve25519);
    Ok(())
}

#[test]
fn loading_replaces_the_previous_key() -> TestResult {
    let mut context = PkContext::new();
    context.parse_private_key(RSA_PRIVATE_PEM, None)?;
    assert_eq!(context.key_type(), KeyType::Rsa);

    context.parse_private_key(P384_PRIVATE_PEM, None)?;
    assert_eq!(context.key_type(), KeyType::EcP384);
    assert_eq!(context.key_size_bits(), 384);
    Ok(())
}
