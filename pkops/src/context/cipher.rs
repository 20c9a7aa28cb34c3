//! Encryption and decryption.

use log::{debug, error};
use rsa::Pkcs1v15Encrypt;

use super::PkContext;
use crate::{Error, key::PkKey, prepare::check_size};

impl PkContext {
    /// Encrypts `data` with the loaded RSA key.
    ///
    /// Both private and public RSA keys can encrypt. The ciphertext has
    /// the length of the key capacity (see [`PkContext::key_size_bytes`]).
    /// PKCS#1 v1.5 encryption padding limits `data` to the key capacity
    /// minus 11 bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if
    /// - no key is loaded,
    /// - the loaded key is not an RSA key,
    /// - `data` exceeds the key capacity,
    /// - or the native encryption operation fails, such as for `data`
    ///   within 11 bytes of the key capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use pkops::PkContext;
    ///
    /// # fn main() -> testresult::TestResult {
    /// let pem = include_bytes!(concat!(
    ///     env!("CARGO_MANIFEST_DIR"),
    ///     "/tests/fixtures/rsa2048.pkcs8.pem"
    /// ));
    ///
    /// let mut context = PkContext::new();
    /// context.parse_private_key(pem, None)?;
    ///
    /// let secret = b"0123456789abcdef0123456789abcdef";
    /// let ciphertext = context.encrypt(secret)?;
    /// assert_eq!(ciphertext.len(), context.key_size_bytes());
    /// assert_eq!(context.decrypt(&ciphertext)?, secret);
    /// # Ok(())
    /// # }
    /// ```
    pub fn encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let key = self.state.loaded_key("encryption")?;
        debug!("Encrypting a {} byte message", data.len());
        check_size(data, key.size_bytes())?;
        let ciphertext = match key {
            PkKey::RsaPrivate(private_key) => {
                private_key
                    .to_public_key()
                    .encrypt(&mut self.random, Pkcs1v15Encrypt, data)
            }
            PkKey::RsaPublic(public_key) => {
                public_key.encrypt(&mut self.random, Pkcs1v15Encrypt, data)
            }
            _ => {
                return Err(Error::OperationUnsupported {
                    key_type: key.key_type(),
                    operation: "encryption",
                });
            }
        }
        .map_err(|source| {
            error!("Encrypting with an RSA key failed: {source:?}");
            Error::Encrypt {
                context: "encrypting with an RSA key",
                source: Box::new(source),
            }
        })?;
        debug!("Created a {} byte ciphertext", ciphertext.len());
        Ok(ciphertext)
    }

    /// Decrypts `data` with the loaded private RSA key.
    ///
    /// The inverse of [`PkContext::encrypt`], which also shows the
    /// round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if
    /// - no key is loaded,
    /// - the loaded key is not an RSA key,
    /// - only a public key is loaded,
    /// - `data` exceeds the key capacity,
    /// - or the native decryption operation fails, such as for a
    ///   ciphertext that was not created with the matching public key.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let key = self.state.loaded_key("decryption")?;
        debug!("Decrypting a {} byte ciphertext", data.len());
        check_size(data, key.size_bytes())?;
        let message = match key {
            PkKey::RsaPrivate(private_key) => private_key
                .decrypt(Pkcs1v15Encrypt, data)
                .map_err(|source| {
                    error!("Decrypting with an RSA key failed: {source:?}");
                    Error::Decrypt {
                        context: "decrypting with an RSA key",
                        source: Box::new(source),
                    }
                })?,
            PkKey::RsaPublic(_) => {
                return Err(Error::PrivateKeyRequired {
                    operation: "decryption",
                });
            }
            _ => {
                return Err(Error::OperationUnsupported {
                    key_type: key.key_type(),
                    operation: "decryption",
                });
            }
        };
        debug!("Recovered a {} byte message", message.len());
        Ok(message)
    }
}
