//! Credential persistence.
//!
//! The gateway reads the credential on every outgoing request and writes it
//! only at login, logout and on a 401. Implementations must make `load`,
//! `save` and `clear` individually atomic; no cross-call locking is expected.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Credential;

/// Storage key used when none is configured.
pub const DEFAULT_CREDENTIAL_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("credential storage I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode credential: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot determine a local data directory for credential storage")]
    NoStorageDir,
}

/// Port through which the gateway reaches the persisted credential.
pub trait CredentialStore: Send + Sync {
    /// Current credential, if any. Unreadable storage counts as "no credential".
    fn load(&self) -> Option<Credential>;

    fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError>;

    /// Remove the credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// Process-local store, mostly for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

/// On-disk record for one stored credential.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: Credential,
    saved_at: DateTime<Utc>,
}

/// File-backed store: one JSON document per storage key.
///
/// Writes go through a temporary file and a rename so readers never observe
/// a half-written token.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store the credential for `key` under `dir` (created on first save).
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", sanitize_key(key))),
        }
    }

    /// Store under the platform's local data directory (`<data>/auditdesk`).
    pub fn default_location(key: &str) -> Result<Self, CredentialStoreError> {
        let base = dirs::data_local_dir().ok_or(CredentialStoreError::NoStorageDir)?;
        Ok(Self::new(base.join("auditdesk"), key))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the stored credential was written, if one is present.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.read_record().map(|record| record.saved_at)
    }

    fn read_record(&self) -> Option<StoredCredential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read credential file {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str::<StoredCredential>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("ignoring unreadable credential file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> CredentialStoreError {
        CredentialStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.read_record().map(|record| record.token)
    }

    fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let record = StoredCredential {
            token: credential.clone(),
            saved_at: Utc::now(),
        };
        let encoded = serde_json::to_vec_pretty(&record)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!("credential saved to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("credential removed from {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Keep storage keys usable as file names.
fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        DEFAULT_CREDENTIAL_KEY.to_string()
    } else {
        cleaned
    }
}
