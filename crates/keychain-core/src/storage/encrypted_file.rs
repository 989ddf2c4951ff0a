//! Encrypted file store
//!
//! All items live in one JSON file. The header carries the Argon2id salt and
//! cost parameters plus a sealed verifier used to reject wrong passwords;
//! each item's secret bytes are sealed individually with AES-256-GCM while
//! its other attributes stay in clear text so items can be matched without
//! decrypting every secret.
//!
//! Every call reloads the file and, for mutations, rewrites it atomically
//! through a temporary file. Concurrent calls within the process are
//! serialized by a mutex.

use keychain_status::{Status, StatusCode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, error};

use super::{ItemStore, RecordSet, SearchRequest, SearchResponse};
use crate::crypto::{self, KeyDerivationParams, MasterKey, SealedBlob};
use crate::error::{KeychainError, Result};
use crate::options::{AttrKey, AttrValue, Attributes};

const FILE_VERSION: u32 = 1;
const VERIFIER_PLAINTEXT: &[u8] = b"keychain-access-verifier";

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    version: u32,
    salt: String,
    kdf: KeyDerivationParams,
    verifier: String,
    records: Vec<StoredRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

#[derive(Debug, Clone)]
struct Header {
    salt: String,
    kdf: KeyDerivationParams,
    verifier: String,
}

/// Store persisting items to a password-protected file
pub struct EncryptedFileStore {
    path: PathBuf,
    key: MasterKey,
    header: Header,
    lock: Mutex<()>,
}

impl std::fmt::Debug for EncryptedFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl EncryptedFileStore {
    /// Open the store at `path`, creating it with default key derivation
    /// parameters if it does not exist
    pub fn open(path: impl Into<PathBuf>, password: &str) -> Result<Self> {
        Self::open_with_params(path, password, KeyDerivationParams::default())
    }

    /// Like [`EncryptedFileStore::open`]; `params` only applies when the
    /// file is created, an existing file keeps the parameters in its header.
    pub fn open_with_params(
        path: impl Into<PathBuf>,
        password: &str,
        params: KeyDerivationParams,
    ) -> Result<Self> {
        let path = path.into();

        if path.exists() {
            let file = read_file(&path)?;
            if file.version != FILE_VERSION {
                return Err(KeychainError::StorageError(format!(
                    "unsupported store version {}",
                    file.version
                )));
            }

            let salt = hex::decode(&file.salt)
                .map_err(|e| KeychainError::StorageError(format!("invalid salt: {}", e)))?;
            let key = crypto::derive_key(password, &salt, file.kdf)?;

            let verifier: SealedBlob = file.verifier.parse()?;
            if crypto::open(&verifier, &key).is_err() {
                return Err(KeychainError::InvalidPassword);
            }

            debug!("Opened encrypted store at {:?} ({} items)", path, file.records.len());
            return Ok(Self {
                path,
                key,
                header: Header {
                    salt: file.salt,
                    kdf: file.kdf,
                    verifier: file.verifier,
                },
                lock: Mutex::new(()),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let salt = crypto::generate_salt();
        let key = crypto::derive_key(password, &salt, params)?;
        let verifier = crypto::seal(VERIFIER_PLAINTEXT, &key)?;

        let store = Self {
            path,
            key,
            header: Header {
                salt: hex::encode(salt),
                kdf: params,
                verifier: verifier.to_string(),
            },
            lock: Mutex::new(()),
        };
        store.save(&RecordSet::new())?;

        debug!("Created encrypted store at {:?}", store.path);
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decrypt every item
    fn load(&self) -> Result<RecordSet> {
        if !self.path.exists() {
            return Ok(RecordSet::new());
        }

        let file = read_file(&self.path)?;
        let records = file
            .records
            .into_iter()
            .map(|stored| -> Result<Attributes> {
                let mut attributes = stored.attributes;
                if let Some(sealed) = stored.data {
                    let blob: SealedBlob = sealed.parse()?;
                    let plaintext = crypto::open(&blob, &self.key)?;
                    attributes.insert(AttrKey::ValueData, AttrValue::Data(plaintext.to_vec()));
                }
                Ok(attributes)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RecordSet::from_records(records))
    }

    /// Seal every item and replace the file atomically
    fn save(&self, records: &RecordSet) -> Result<()> {
        let records = records
            .records()
            .iter()
            .map(|record| -> Result<StoredRecord> {
                let mut attributes = record.clone();
                let data = match attributes.remove(AttrKey::ValueData) {
                    Some(AttrValue::Data(bytes)) => Some(crypto::seal(&bytes, &self.key)?.to_string()),
                    Some(other) => {
                        return Err(KeychainError::StorageError(format!(
                            "item data must be bytes, got {:?}",
                            other
                        )))
                    }
                    None => None,
                };
                Ok(StoredRecord { attributes, data })
            })
            .collect::<Result<Vec<_>>>()?;

        let file = StoreFile {
            version: FILE_VERSION,
            salt: self.header.salt.clone(),
            kdf: self.header.kdf,
            verifier: self.header.verifier.clone(),
            records,
        };

        let contents = serde_json::to_string_pretty(&file)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;

        debug!("Saved {} items to {:?}", file.records.len(), self.path);
        Ok(())
    }

    /// Run `op` against the current items, persisting them when it succeeds
    fn mutate(&self, op: impl FnOnce(&mut RecordSet) -> StatusCode) -> StatusCode {
        let Ok(_guard) = self.lock.lock() else {
            error!("Encrypted store lock poisoned");
            return Status::NotAvailable.code();
        };

        let mut records = match self.load() {
            Ok(records) => records,
            Err(e) => return failure_status(&e),
        };

        let status = op(&mut records);
        if status == Status::Success.code() {
            if let Err(e) = self.save(&records) {
                return failure_status(&e);
            }
        }
        status
    }
}

fn read_file(path: &Path) -> Result<StoreFile> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Map an internal failure to the status a caller sees
fn failure_status(err: &KeychainError) -> StatusCode {
    error!("Encrypted store failure: {}", err);
    let status = match err {
        KeychainError::IoError(_) => Status::NotAvailable,
        KeychainError::DecryptionError(_) => Status::Decode,
        KeychainError::SerializationError(_) => Status::InvalidKeychain,
        _ => Status::UnknownError,
    };
    status.code()
}

impl ItemStore for EncryptedFileStore {
    fn search(&self, request: &SearchRequest) -> SearchResponse {
        let Ok(_guard) = self.lock.lock() else {
            error!("Encrypted store lock poisoned");
            return SearchResponse::failed(Status::NotAvailable);
        };

        match self.load() {
            Ok(records) => records.search(request),
            Err(e) => SearchResponse::failed(failure_status(&e)),
        }
    }

    fn insert(&self, attributes: &Attributes) -> StatusCode {
        self.mutate(|records| records.insert(attributes))
    }

    fn update(&self, query: &Attributes, changes: &Attributes) -> StatusCode {
        self.mutate(|records| records.update(query, changes))
    }

    fn delete(&self, query: &Attributes, match_all: bool) -> StatusCode {
        self.mutate(|records| records.delete(query, match_all))
    }

    fn backend_name(&self) -> &'static str {
        "Encrypted File"
    }
}
