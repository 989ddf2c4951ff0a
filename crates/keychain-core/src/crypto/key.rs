use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{KeychainError, Result};

/// Length of the random salt stored in a file header
pub const SALT_LEN: usize = 16;

const KEY_LEN: usize = 32;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDerivationParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KeyDerivationParams {
    /// Cheap parameters for tests and throwaway stores
    pub fn fast() -> Self {
        Self {
            memory_cost: 8192,
            time_cost: 1,
            parallelism: 1,
        }
    }
}

/// File encryption key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    key: [u8; KEY_LEN],
}

impl MasterKey {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}

pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Derive a 256-bit key from `password` and `salt` with Argon2id
pub fn derive_key(password: &str, salt: &[u8], params: KeyDerivationParams) -> Result<MasterKey> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| KeychainError::KeyDerivationError(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| KeychainError::KeyDerivationError(e.to_string()))?;

    let master = MasterKey::new(key);
    key.zeroize();
    Ok(master)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let salt = generate_salt();
        let a = derive_key("pw", &salt, KeyDerivationParams::fast()).unwrap();
        let b = derive_key("pw", &salt, KeyDerivationParams::fast()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_password_and_salt_both_matter() {
        let salt = generate_salt();
        let base = derive_key("pw", &salt, KeyDerivationParams::fast()).unwrap();
        let other_pw = derive_key("pw2", &salt, KeyDerivationParams::fast()).unwrap();
        let other_salt = derive_key("pw", &generate_salt(), KeyDerivationParams::fast()).unwrap();
        assert_ne!(base.as_bytes(), other_pw.as_bytes());
        assert_ne!(base.as_bytes(), other_salt.as_bytes());
    }

    #[test]
    fn test_short_salt_rejected() {
        let err = derive_key("pw", b"abc", KeyDerivationParams::fast()).unwrap_err();
        assert!(matches!(err, KeychainError::KeyDerivationError(_)));
    }

    #[test]
    fn test_debug_redacted() {
        let key = MasterKey::new([7u8; 32]);
        assert_eq!(format!("{:?}", key), "MasterKey([REDACTED])");
    }
}
