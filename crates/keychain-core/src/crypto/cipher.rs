use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

use super::MasterKey;
use crate::error::{KeychainError, Result};

const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// One sealed value: `{iv_hex}:{tag_hex}:{ciphertext_hex}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    iv: [u8; IV_LEN],
    tag: [u8; TAG_LEN],
    ciphertext: Vec<u8>,
}

impl fmt::Display for SealedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            hex::encode(self.iv),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext)
        )
    }
}

fn decode_fixed<const N: usize>(part: &str, what: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(part)
        .map_err(|e| KeychainError::DecryptionError(format!("invalid {} hex: {}", what, e)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        KeychainError::DecryptionError(format!(
            "invalid {} length: expected {}, got {}",
            what,
            N,
            bytes.len()
        ))
    })
}

impl FromStr for SealedBlob {
    type Err = KeychainError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        let (Some(iv), Some(tag), Some(ciphertext), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(KeychainError::DecryptionError(
                "expected iv:tag:ciphertext".to_string(),
            ));
        };

        Ok(Self {
            iv: decode_fixed(iv, "IV")?,
            tag: decode_fixed(tag, "tag")?,
            ciphertext: hex::decode(ciphertext).map_err(|e| {
                KeychainError::DecryptionError(format!("invalid ciphertext hex: {}", e))
            })?,
        })
    }
}

/// Encrypt `plaintext` under a fresh random IV
pub fn seal(plaintext: &[u8], key: &MasterKey) -> Result<SealedBlob> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| KeychainError::EncryptionError(e.to_string()))?;

    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);

    // aes-gcm appends the tag to the ciphertext
    let mut sealed = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| KeychainError::EncryptionError(e.to_string()))?;
    if sealed.len() < TAG_LEN {
        return Err(KeychainError::EncryptionError(
            "ciphertext too short".to_string(),
        ));
    }

    let tag_bytes = sealed.split_off(sealed.len() - TAG_LEN);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&tag_bytes);

    Ok(SealedBlob {
        iv,
        tag,
        ciphertext: sealed,
    })
}

/// Decrypt and authenticate a blob
pub fn open(blob: &SealedBlob, key: &MasterKey) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| KeychainError::DecryptionError(e.to_string()))?;

    let mut combined = Vec::with_capacity(blob.ciphertext.len() + TAG_LEN);
    combined.extend_from_slice(&blob.ciphertext);
    combined.extend_from_slice(&blob.tag);

    cipher
        .decrypt(Nonce::from_slice(&blob.iv), combined.as_slice())
        .map(Zeroizing::new)
        .map_err(|e| KeychainError::DecryptionError(e.to_string()))
}
