//! Persistent holder for the current auth session
//!
//! Keeps the session in memory and mirrors it to `session.json`, so a new
//! process picks up where the last one left off without logging in again.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AkibaError;
use crate::models::User;
use crate::session::Session;

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

/// Process-wide session state, single writer (login/logout), many readers
pub struct SessionStore {
    /// `None` for an in-memory store that never touches disk
    path: Option<PathBuf>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Rehydrate the session from disk
    ///
    /// A missing file means "logged out". A corrupt file is an error.
    pub fn load(path: PathBuf) -> Result<Self, AkibaError> {
        let session: Option<Session> = read_json_optional(&path)?;
        if let Some(s) = &session {
            tracing::debug!(user = %s.user.email, "restored session");
        }

        Ok(Self {
            path: Some(path),
            current: RwLock::new(session),
        })
    }

    /// A store that is not persisted
    pub fn in_memory() -> Self {
        Self {
            path: None,
            current: RwLock::new(None),
        }
    }

    /// Replace the current session and persist it
    pub fn set(&self, session: Session) -> Result<(), AkibaError> {
        if let Some(path) = &self.path {
            write_json_atomic(path, &session)?;
        }

        let mut current = self
            .current
            .write()
            .map_err(|e| AkibaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        tracing::info!(user = %session.user.email, "session stored");
        *current = Some(session);
        Ok(())
    }

    /// Drop the current session and delete the persisted copy
    pub fn clear(&self) -> Result<(), AkibaError> {
        let mut current = self
            .current
            .write()
            .map_err(|e| AkibaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *current = None;
        drop(current);

        if let Some(path) = &self.path {
            remove_if_exists(path)?;
        }
        tracing::info!("session cleared");
        Ok(())
    }

    /// A copy of the current session
    pub fn current(&self) -> Result<Option<Session>, AkibaError> {
        let current = self
            .current
            .read()
            .map_err(|e| AkibaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(current.clone())
    }

    /// The `Authorization` header value, if logged in
    pub fn authorization_header(&self) -> Result<Option<String>, AkibaError> {
        let current = self
            .current
            .read()
            .map_err(|e| AkibaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(current.as_ref().map(Session::authorization_header))
    }

    /// The logged-in user, if any
    pub fn user(&self) -> Result<Option<User>, AkibaError> {
        Ok(self.current()?.map(|s| s.user.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .map(|current| current.is_some())
            .unwrap_or(false)
    }
}
