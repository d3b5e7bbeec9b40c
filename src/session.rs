//! Durable storage for the bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth store writes the token here on login/registration, removes it on
//! logout, and reads it once at startup to rehydrate the session. Exactly one
//! key is stored: the raw token string.
//!
//! ERROR HANDLING
//! ==============
//! Callers log storage failures and carry on; the in-memory session stays
//! authoritative for the life of the process.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Name of the single persisted key.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Token persistence injected into the application store.
pub trait SessionPersistence: Send + Sync {
    /// Read the persisted token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load_token(&self) -> Result<Option<String>, SessionError>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save_token(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the persisted token. Removing an absent token succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn clear_token(&self) -> Result<(), SessionError>;
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Stores the token as the sole contents of one file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Platform default location of the token file, e.g.
/// `~/.local/share/coursedesk/token` on Linux.
#[must_use]
pub fn default_token_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "coursedesk", "coursedesk").map(|dirs| dirs.data_dir().join(TOKEN_KEY))
}

impl SessionPersistence for FileSessionStore {
    fn load_token(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_private(&self.path, token)?;
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `contents` readable by the owner only.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on create; tighten a file left by an older write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local token storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }

    /// Current stored value, bypassing the trait.
    #[must_use]
    pub fn peek(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.peek())
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
