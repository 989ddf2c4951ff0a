//! Sealing of stored secrets
//!
//! - AES-256-GCM sealing of item data, serialized as `iv:tag:ciphertext` hex
//! - Argon2id derivation of the file key from a password and a random salt
//! - Key material zeroed on drop

mod cipher;
mod key;

pub use cipher::{open, seal, SealedBlob};
pub use key::{derive_key, generate_salt, KeyDerivationParams, MasterKey, SALT_LEN};
