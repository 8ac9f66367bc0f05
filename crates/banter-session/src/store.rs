//! Persisted credential storage
//!
//! A small key-value store holding the subject identity and the access
//! and refresh credentials, surviving restarts within the same profile.
//! The file backend keeps a TOML document under the platform config
//! directory. Loads are lenient (an unreadable file is an empty store)
//! and write failures are logged rather than surfaced, so callers never
//! handle IO errors on the credential path.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::paths;

/// Key-value store for credential material.
///
/// Keys in use: `user` (subject identity), `access` and `refresh`
/// (bearer credentials).
pub trait CredentialStore: Send + Sync {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Drop `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Credential store backed by `credentials.toml` in the config directory.
pub struct FileCredentialStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileCredentialStore {
    /// Open the store at the default location, loading existing values.
    pub fn open() -> Result<Self> {
        Ok(Self::at(paths::credentials_path()?))
    }

    /// Open the store at a specific path.
    pub fn at(path: PathBuf) -> Self {
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(values) => {
                    log::info!("Loaded credentials from {:?}", path);
                    values
                }
                Err(e) => {
                    log::warn!("Failed to parse credential file: {}", e);
                    BTreeMap::new()
                }
            },
            Err(_) => {
                log::debug!("No credential file found, starting fresh");
                BTreeMap::new()
            }
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn persist(&self, values: &BTreeMap<String, String>) {
        if let Err(e) = self.try_persist(values) {
            log::warn!("Failed to persist credentials: {:#}", e);
        }
    }

    fn try_persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let content = toml::to_string_pretty(values).context("Failed to serialize credentials")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write credential file: {:?}", self.path))
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock().unwrap();
        if values.remove(key).is_some() {
            self.persist(&values);
        }
    }
}

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}
