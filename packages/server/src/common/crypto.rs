//! Symmetric encryption for site credentials stored at rest.
//!
//! Blobs are `base64(iv || ciphertext)` where the ciphertext is AES-256-CBC
//! with PKCS#7 padding and the IV is 16 fresh random bytes per call. The key
//! is SHA-256 of the configured secret, so any secret length works.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretBox};
use sha2::{Digest, Sha256};
use thiserror::Error;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("ciphertext is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("ciphertext is too short ({0} bytes)")]
    Truncated(usize),

    #[error("ciphertext is not block aligned ({0} bytes)")]
    Misaligned(usize),

    #[error("invalid key or iv length")]
    Key,

    #[error("decryption failed (bad padding or wrong key)")]
    Decrypt,

    #[error("decrypted credential is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encrypts and decrypts credential strings with a key derived once at startup.
pub struct CredentialCodec {
    key: SecretBox<[u8; 32]>,
}

impl CredentialCodec {
    pub fn new(secret: &str) -> Self {
        let digest: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
        Self {
            key: SecretBox::new(Box::new(digest)),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CredentialError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new_from_slices(self.key.expose_secret(), &iv)
            .map_err(|_| CredentialError::Key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(blob))
    }

    /// Strict decryption; every malformed input is an error.
    pub fn decrypt(&self, blob: &str) -> Result<String, CredentialError> {
        if blob.is_empty() {
            return Ok(String::new());
        }

        let raw = STANDARD.decode(blob.trim())?;
        if raw.len() < IV_LEN + BLOCK_LEN {
            return Err(CredentialError::Truncated(raw.len()));
        }

        let (iv, ciphertext) = raw.split_at(IV_LEN);
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CredentialError::Misaligned(ciphertext.len()));
        }

        let plaintext = Aes256CbcDec::new_from_slices(self.key.expose_secret(), iv)
            .map_err(|_| CredentialError::Key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CredentialError::Decrypt)?;

        Ok(String::from_utf8(plaintext)?)
    }

    /// Read-back variant: logs and yields an empty string instead of failing.
    pub fn decrypt_or_empty(&self, blob: &str) -> String {
        match self.decrypt(blob) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decrypt stored credential");
                String::new()
            }
        }
    }

    /// Encrypt a credential supplied as JSON. Objects and arrays are stored as
    /// their JSON text, strings as-is; null and empty values store nothing.
    pub fn encrypt_value(
        &self,
        value: &serde_json::Value,
    ) -> Result<Option<String>, CredentialError> {
        let plaintext = match value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if plaintext.trim().is_empty() {
            return Ok(None);
        }
        self.encrypt(&plaintext).map(Some)
    }
}

impl std::fmt::Debug for CredentialCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCodec").finish_non_exhaustive()
    }
}
