//! Configuration for opening a keychain
//!
//! Non-sensitive defaults live in a plain JSON file. Secrets never do: the
//! file backend's password is supplied by the caller at open time.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{KeychainError, Result};
use crate::keychain::Keychain;
use crate::options::{self, Accessibility, Options};
use crate::storage::{EncryptedFileStore, ItemStore, MemoryStore, OsKeyringStore};

/// Environment variable overriding the default service name
pub const SERVICE_ENV_VAR: &str = "KEYCHAIN_SERVICE";

/// File name of the encrypted store inside the storage directory
pub const STORE_FILE_NAME: &str = "keychain.json";

/// Which store a configured keychain opens
///
/// `Os` addresses single entries only: enumeration and partition-wide
/// deletes answer `Unimplemented` there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    #[default]
    File,
    Os,
}

/// Keychain settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub version: u32,
    /// Service used when none is given; falls back to the process name
    pub default_service: Option<String>,
    pub default_accessibility: Accessibility,
    pub synchronizable: bool,
    pub backend: Backend,
    /// Directory holding the encrypted store file
    pub storage_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            default_service: None,
            default_accessibility: Accessibility::default(),
            synchronizable: false,
            backend: Backend::default(),
            storage_dir: None,
        }
    }
}

fn resolve_service(
    env: Option<String>,
    configured: Option<&str>,
    process: Option<String>,
) -> Option<String> {
    env.filter(|s| !s.is_empty())
        .or_else(|| configured.filter(|s| !s.is_empty()).map(str::to_string))
        .or(process)
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform data directory for this library
    pub fn default_storage_dir() -> Result<PathBuf> {
        ProjectDirs::from("com", "keychain-access", "keychain-access")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                KeychainError::SettingsError("could not determine data directory".to_string())
            })
    }

    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_storage_dir(),
        }
    }

    /// Service name: `KEYCHAIN_SERVICE`, then the configured default, then
    /// the process name
    pub fn service_name(&self) -> Option<String> {
        resolve_service(
            std::env::var(SERVICE_ENV_VAR).ok(),
            self.default_service.as_deref(),
            options::process_identifier(),
        )
    }

    /// Generic-service options seeded with the configured defaults
    pub fn options(&self) -> Result<Options> {
        let service = self.service_name().ok_or_else(|| {
            KeychainError::SettingsError("no service name configured".to_string())
        })?;

        Ok(Options::generic(service)?
            .with_accessibility(self.default_accessibility)
            .with_synchronizable(self.synchronizable))
    }

    /// Open the configured store. The file backend requires `password`.
    pub fn open_store(&self, password: Option<&str>) -> Result<Arc<dyn ItemStore>> {
        let store: Arc<dyn ItemStore> = match self.backend {
            Backend::Memory => Arc::new(MemoryStore::new()),
            Backend::Os => Arc::new(OsKeyringStore::new()),
            Backend::File => {
                let password = password.ok_or(KeychainError::InvalidPassword)?;
                let path = self.storage_dir()?.join(STORE_FILE_NAME);
                Arc::new(EncryptedFileStore::open(path, password)?)
            }
        };

        debug!("Opened {} store", store.backend_name());
        Ok(store)
    }

    /// Handle onto the default partition of the configured store
    pub fn keychain(&self, password: Option<&str>) -> Result<Keychain> {
        Ok(Keychain::new(self.options()?, self.open_store(password)?))
    }
}

/// Loads and persists [`Settings`]
pub struct SettingsManager {
    settings_file: PathBuf,
    settings: Settings,
}

impl SettingsManager {
    /// Read settings from `path`; a missing file yields defaults
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let settings_file = path.into();
        let settings = if settings_file.exists() {
            let contents = std::fs::read_to_string(&settings_file)?;
            let settings = serde_json::from_str(&contents)?;
            debug!("Loaded settings from {:?}", settings_file);
            settings
        } else {
            debug!("No settings file found, using defaults");
            Settings::default()
        };

        Ok(Self {
            settings_file,
            settings,
        })
    }

    /// Settings file in the platform config directory
    pub fn load_default() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "keychain-access", "keychain-access").ok_or_else(
            || KeychainError::SettingsError("could not determine config directory".to_string()),
        )?;
        Self::load(dirs.config_dir().join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.settings_file
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Write settings atomically via a temp file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self
            .settings_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.settings)?;
        let temp_path = self.settings_file.with_extension("tmp");
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &self.settings_file)?;

        debug!("Saved settings to {:?}", self.settings_file);
        Ok(())
    }

    pub fn update(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.save()
    }

    /// Restore defaults and delete the settings file
    pub fn reset(&mut self) -> Result<()> {
        self.settings = Settings::default();
        if self.settings_file.exists() {
            std::fs::remove_file(&self.settings_file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = SettingsManager::load(dir.path().join("settings.json")).unwrap();
        assert_eq!(manager.get(), &Settings::default());
        assert_eq!(manager.get().backend, Backend::File);
        assert_eq!(
            manager.get().default_accessibility,
            Accessibility::AfterFirstUnlock
        );
    }

    #[test]
    fn test_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        {
            let mut manager = SettingsManager::load(&path).unwrap();
            manager.get_mut().default_service = Some("app.test".to_string());
            manager.get_mut().backend = Backend::Os;
            manager.get_mut().synchronizable = true;
            manager.save().unwrap();
        }

        let manager = SettingsManager::load(&path).unwrap();
        assert_eq!(manager.get().default_service.as_deref(), Some("app.test"));
        assert_eq!(manager.get().backend, Backend::Os);
        assert!(manager.get().synchronizable);
    }

    #[test]
    fn test_camel_case_and_partial_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"defaultService":"svc","defaultAccessibility":"WhenUnlocked","backend":"memory"}"#,
        )
        .unwrap();

        let settings = SettingsManager::load(&path).unwrap().get().clone();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.default_accessibility, Accessibility::WhenUnlocked);
        assert_eq!(settings.backend, Backend::Memory);
        assert!(!settings.synchronizable);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            SettingsManager::load(&path),
            Err(KeychainError::SerializationError(_))
        ));
    }

    #[test]
    fn test_reset_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut manager = SettingsManager::load(&path).unwrap();
        manager.get_mut().synchronizable = true;
        manager.save().unwrap();
        assert!(path.exists());

        manager.reset().unwrap();
        assert!(!path.exists());
        assert!(!manager.get().synchronizable);
    }

    #[test]
    fn test_service_resolution_order() {
        let process = Some("proc".to_string());
        assert_eq!(
            resolve_service(Some("env".into()), Some("cfg"), process.clone()).as_deref(),
            Some("env")
        );
        assert_eq!(
            resolve_service(Some(String::new()), Some("cfg"), process.clone()).as_deref(),
            Some("cfg")
        );
        assert_eq!(
            resolve_service(None, None, process).as_deref(),
            Some("proc")
        );
        assert_eq!(resolve_service(None, Some(""), None), None);
    }

    #[test]
    fn test_memory_keychain_from_settings() {
        let settings = Settings {
            default_service: Some("configured".to_string()),
            default_accessibility: Accessibility::WhenUnlocked,
            backend: Backend::Memory,
            ..Settings::default()
        };

        let keychain = settings.keychain(None).unwrap();
        assert_eq!(keychain.backend_name(), "Memory");
        assert_eq!(keychain.accessibility(), Accessibility::WhenUnlocked);
        keychain.set("k", "v").unwrap();
        assert!(keychain.contains("k"));
    }

    #[test]
    fn test_default_keychain_enumerates_and_clears() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            default_service: Some("app.test".to_string()),
            storage_dir: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };

        let keychain = settings.keychain(Some("pw")).unwrap();
        assert_eq!(keychain.backend_name(), "Encrypted File");
        assert!(keychain.all_items().unwrap().is_empty());

        keychain.set("token", "abc").unwrap();
        keychain.set("refresh", "def").unwrap();
        assert_eq!(keychain.all_items().unwrap().len(), 2);

        keychain.remove_all().unwrap();
        assert!(keychain.all_items().unwrap().is_empty());
        assert!(keychain.all_keys().unwrap().is_empty());
        assert!(dir.path().join(STORE_FILE_NAME).exists());
    }

    #[test]
    fn test_file_backend_requires_password() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            backend: Backend::File,
            storage_dir: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };

        assert!(matches!(
            settings.open_store(None),
            Err(KeychainError::InvalidPassword)
        ));
    }
}
