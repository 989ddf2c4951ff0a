//! # keychain-core
//!
//! Typed access to a platform-style credential store:
//! - [`Options`]: immutable partition and protection settings of a handle
//! - [`Keychain`]: get/set/remove/enumerate secrets within one partition
//! - [`ItemStore`]: the store seam, with memory, encrypted-file and OS
//!   keyring backends
//!
//! Store results are raw status codes decoded through [`keychain_status`].
//! "Item not found" is never an error; see [`KeychainError`] for the rest.

pub mod crypto;
pub mod error;
pub mod item;
mod keychain;
pub mod options;
pub mod settings;
pub mod storage;

pub use error::{KeychainError, Result};
pub use item::{ItemRecord, ItemValue};
pub use keychain::{all_items, all_keys, Keychain};
pub use keychain_status::{Status, StatusCode};
pub use options::{Accessibility, AuthenticationKind, ItemScope, Options, Partition, ProtocolKind};
pub use settings::{Backend, Settings, SettingsManager};
pub use storage::{EncryptedFileStore, ItemStore, MemoryStore, OsKeyringStore};
