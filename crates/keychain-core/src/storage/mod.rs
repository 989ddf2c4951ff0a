//! Credential store backends
//!
//! - [`MemoryStore`]: in-process, for tests and ephemeral use
//! - [`EncryptedFileStore`]: password-protected file
//! - [`OsKeyringStore`]: the platform credential manager

mod encrypted_file;
mod memory;
mod os_keyring;
mod records;
mod traits;

pub use encrypted_file::EncryptedFileStore;
pub use memory::MemoryStore;
pub use os_keyring::OsKeyringStore;
pub use records::RecordSet;
pub use traits::{ItemStore, SearchRequest, SearchResponse};
