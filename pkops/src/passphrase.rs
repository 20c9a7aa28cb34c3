//! Passphrase handling.

use std::{convert::Infallible, fmt::Display, str::FromStr};

use secrecy::{ExposeSecret, SecretString};

/// A secret passphrase protecting encrypted key material
///
/// The passphrase is held by a [`SecretString`], which guarantees zeroing of
/// memory on destruct. Display and debug output are redacted.
///
/// An absent passphrase and a present-but-empty passphrase are different
/// things at the parsing boundary: loaders take `Option<&Passphrase>`, and
/// an empty [`Passphrase`] is passed on to decryption as such.
#[derive(Clone, Debug, Default)]
pub struct Passphrase(SecretString);

impl Passphrase {
    /// Creates a new [`Passphrase`] from an owned [`String`]
    ///
    /// # Examples
    ///
    /// ```
    /// use pkops::Passphrase;
    ///
    /// let passphrase = Passphrase::new("passphrase".to_string());
    /// ```
    pub fn new(passphrase: String) -> Self {
        Self(SecretString::new(passphrase.into()))
    }

    /// Exposes the secret passphrase as borrowed [`str`]
    pub fn expose_borrowed(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Display for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl FromStr for Passphrase {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.to_string()))
    }
}
