//! URL signing with HMAC-SHA256
//!
//! The signature covers the salt followed by the URL path:
//! ```text
//! signature = base64url(HMAC-SHA256(key, salt + path))
//! ```
//! Key and salt are configured as hex strings and decoded once.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::BuilderError;

type HmacSha256 = Hmac<Sha256>;

/// Keyed signer for proxy paths
#[derive(Clone)]
pub struct UrlSigner {
    mac: HmacSha256,
    salt: Vec<u8>,
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner")
            .field("key", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl UrlSigner {
    /// Create a signer from raw key and salt bytes
    pub fn new(key: &[u8], salt: impl Into<Vec<u8>>) -> Result<Self, BuilderError> {
        let mac = HmacSha256::new_from_slice(key)
            .map_err(|e| BuilderError::invalid_config(format!("signing key: {}", e)))?;
        Ok(Self {
            mac,
            salt: salt.into(),
        })
    }

    /// Create a signer from hex-encoded key and salt
    pub fn from_hex(key: &str, salt: &str) -> Result<Self, BuilderError> {
        let key = hex_decode("key", key)?;
        let salt = hex_decode("salt", salt)?;
        Self::new(&key, salt)
    }

    fn keyed(&self, path: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(&self.salt);
        mac.update(path.as_bytes());
        mac
    }

    /// Signature for `path` (which starts with `/`)
    pub fn sign(&self, path: &str) -> String {
        base64_url_encode(&self.keyed(path).finalize().into_bytes())
    }

    /// Check the signature segment of a built URL against its path.
    ///
    /// Lets a service sharing the key validate URLs it receives. The
    /// comparison is constant-time.
    pub fn verify(&self, signature: &str, path: &str) -> bool {
        match URL_SAFE_NO_PAD.decode(signature) {
            Ok(tag) => self.keyed(path).verify_slice(&tag).is_ok(),
            Err(_) => false,
        }
    }
}

/// Decode a hex string, naming the offending field on failure
pub fn hex_decode(field: &str, value: &str) -> Result<Vec<u8>, BuilderError> {
    hex::decode(value)
        .map_err(|e| BuilderError::invalid_config(format!("{} is not valid hex: {}", field, e)))
}

/// Base64url encode (URL-safe, no padding)
pub fn base64_url_encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}
