//! Error types for keychain-core

use keychain_status::{Status, StatusCode};
use thiserror::Error;
use tracing::warn;

/// Result type alias for keychain operations
pub type Result<T> = std::result::Result<T, KeychainError>;

/// Code reported for failures raised locally rather than by the store
pub const LOCAL_ERROR_CODE: StatusCode = -1;

/// Keychain error types
///
/// "Item not found" is never an error: lookups return `Ok(None)` and
/// deletes of absent items succeed.
#[derive(Error, Debug)]
pub enum KeychainError {
    /// Bytes could not be decoded as text (or text encoded as bytes)
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// An insert collided with an existing item
    #[error("Keychain error [{}]: {message}", Status::DuplicateItem.code())]
    DuplicateItem { message: String },

    /// Any other non-success status returned by the store. `code` is the
    /// raw value, which differs from `status.code()` for unmapped codes.
    #[error("Keychain error [{code}]: {message}")]
    Store {
        status: Status,
        code: StatusCode,
        message: String,
    },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Decryption failed: {0}")]
    DecryptionError(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl KeychainError {
    /// Classify a raw store code that is neither success nor not-found.
    ///
    /// The failure is logged once here, so callers do not log it again.
    pub fn from_status(code: StatusCode) -> Self {
        let status = Status::from_code(code);
        let message = status.description().to_string();
        warn!("OSStatus error:[{}] {}", code, message);

        match status {
            Status::DuplicateItem => KeychainError::DuplicateItem { message },
            status => KeychainError::Store {
                status,
                code,
                message,
            },
        }
    }

    /// Local conversion failure, logged like store failures
    pub fn conversion(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("OSStatus error:[{}] {}", LOCAL_ERROR_CODE, message);
        KeychainError::Conversion(message)
    }

    /// Decoded store status, if this failure came from the store
    pub fn status(&self) -> Option<Status> {
        match self {
            KeychainError::DuplicateItem { .. } => Some(Status::DuplicateItem),
            KeychainError::Store { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw numeric code: the store code, or [`LOCAL_ERROR_CODE`] for local failures
    pub fn code(&self) -> StatusCode {
        match self {
            KeychainError::DuplicateItem { .. } => Status::DuplicateItem.code(),
            KeychainError::Store { code, .. } => *code,
            _ => LOCAL_ERROR_CODE,
        }
    }

    pub fn is_duplicate_item(&self) -> bool {
        matches!(self, KeychainError::DuplicateItem { .. })
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, KeychainError::Conversion(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_duplicate_is_distinct() {
        let err = KeychainError::from_status(-25299);
        assert!(err.is_duplicate_item());
        assert_eq!(err.status(), Some(Status::DuplicateItem));
        assert_eq!(err.code(), -25299);
    }

    #[test]
    fn test_from_status_carries_description() {
        let err = KeychainError::from_status(-25308);
        assert_eq!(err.status(), Some(Status::InteractionNotAllowed));
        assert_eq!(
            err.to_string(),
            "Keychain error [-25308]: User interaction is not allowed."
        );
    }

    #[test]
    fn test_unknown_code_keeps_description() {
        let err = KeychainError::from_status(4242);
        assert_eq!(err.status(), Some(Status::UnknownError));
        assert_eq!(err.code(), 4242);
        assert_eq!(
            err.to_string(),
            "Keychain error [4242]: Unknown error has occurred."
        );
    }

    #[test]
    fn test_conversion_is_local() {
        let err = KeychainError::conversion("failed to convert data to string");
        assert!(err.is_conversion());
        assert_eq!(err.status(), None);
        assert_eq!(err.code(), LOCAL_ERROR_CODE);
    }
}
