//! Bearer credential storage.
//!
//! A store holds at most one credential. Reads never return an expired
//! credential: expiry is checked on every `get` and an expired entry is
//! dropped as if it had never been set.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::debug;
use vaultdash_shared::Credential;

/// Errors from a persistent credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Reading or writing the backing file failed.
    #[error("Credential storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a credential.
    #[error("Malformed credential file: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The requested lifetime puts the expiry out of range.
    #[error("Credential lifetime out of range")]
    Lifetime,
}

/// Holds the single bearer credential.
pub trait CredentialStore: Send + Sync {
    /// Current credential, or `None` if absent or expired.
    fn get(&self) -> Result<Option<Credential>, CredentialError>;

    /// Replaces the stored credential.
    fn set(&self, credential: Credential) -> Result<(), CredentialError>;

    /// Removes the stored credential.
    fn clear(&self) -> Result<(), CredentialError>;

    /// Stores `token` with a lifetime of `ttl` from now.
    fn store_token(&self, token: &str, ttl: Duration) -> Result<(), CredentialError> {
        let credential = Credential::issue(token, ttl).ok_or(CredentialError::Lifetime)?;
        self.set(credential)
    }
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Credential>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get_at(&self, now: DateTime<Utc>) -> Option<Credential> {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|c| c.is_expired_at(now)) {
            debug!("dropping expired credential");
            *slot = None;
        }
        slot.clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Result<Option<Credential>, CredentialError> {
        Ok(self.get_at(Utc::now()))
    }

    fn set(&self, credential: Credential) -> Result<(), CredentialError> {
        *self.slot() = Some(credential);
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.slot() = None;
        Ok(())
    }
}

/// Store persisted as a JSON file, so a session survives restarts until
/// the credential expires.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by `path`. The file is created on first `set`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<Credential>, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let credential: Credential = serde_json::from_str(&raw)?;
        if credential.is_expired() {
            debug!(path = %self.path.display(), "removing expired credential");
            self.clear()?;
            return Ok(None);
        }
        Ok(Some(credential))
    }

    fn set(&self, credential: Credential) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(&credential)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}
