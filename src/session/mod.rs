//! Session store
//!
//! Holds the bearer token and the identity of the active family. The store is
//! an explicit object handed to the services that need it; it is filled only
//! by a successful login or registration and emptied by logout or by a fetch
//! the server rejects for lack of a valid session.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::paths::HouseholdPaths;
use crate::error::HouseholdResult;
use crate::models::{FamilyId, FamilySummary};
use crate::storage::{read_json_optional, remove_if_exists, write_json_atomic};

/// Bearer credential; wiped from memory on drop and never printed
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: AuthToken,
    pub family: FamilySummary,
}

impl Session {
    pub fn new(token: AuthToken, family: FamilySummary) -> Self {
        Self { token, family }
    }

    pub fn family_id(&self) -> &FamilyId {
        &self.family.id
    }
}

/// Persistent holder of the current session
#[derive(Debug)]
pub struct SessionStore {
    /// Backing file; `None` keeps the session in memory only
    path: Option<PathBuf>,
    current: Option<Session>,
}

impl SessionStore {
    /// Open the store backed by `<data dir>/session.json`.
    ///
    /// An unreadable session file is discarded, which simply means the user
    /// has to log in again.
    pub fn open(paths: &HouseholdPaths) -> HouseholdResult<Self> {
        let path = paths.session_file();
        let current = match read_json_optional::<Session, _>(&path) {
            Ok(Some(session)) if !session.token.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "discarding unreadable session file");
                remove_if_exists(&path)?;
                None
            }
        };

        if let Some(session) = &current {
            debug!(family = %session.family.id, "restored session");
        }

        Ok(Self {
            path: Some(path),
            current,
        })
    }

    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            current: None,
        }
    }

    /// The active session, if any
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Active family identity, if any
    pub fn family(&self) -> Option<&FamilySummary> {
        self.current.as_ref().map(|s| &s.family)
    }

    /// Replace whatever session was stored with `session`
    pub fn establish(&mut self, session: Session) -> HouseholdResult<()> {
        if let Some(path) = &self.path {
            write_json_atomic(path, &session)?;
        }
        info!(family = %session.family.id, "session established");
        self.current = Some(session);
        Ok(())
    }

    /// Forget the session, in memory and on disk
    pub fn clear(&mut self) -> HouseholdResult<()> {
        self.current = None;
        if let Some(path) = &self.path {
            remove_if_exists(path)?;
        }
        info!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(token: &str, family: &str) -> Session {
        Session::new(
            AuthToken::new(token),
            FamilySummary {
                id: FamilyId::from(family),
                name: "Sharma".into(),
            },
        )
    }

    #[test]
    fn test_session_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut store = SessionStore::open(&paths).unwrap();
        assert!(!store.is_authenticated());
        store.establish(session("tok-1", "f1")).unwrap();

        let reopened = SessionStore::open(&paths).unwrap();
        assert_eq!(reopened.current(), Some(&session("tok-1", "f1")));
    }

    #[test]
    fn test_new_login_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut store = SessionStore::open(&paths).unwrap();
        store.establish(session("tok-1", "f1")).unwrap();
        store.establish(session("tok-2", "f2")).unwrap();

        let reopened = SessionStore::open(&paths).unwrap();
        let current = reopened.current().unwrap();
        assert_eq!(current.token.expose(), "tok-2");
        assert_eq!(current.family_id().as_str(), "f2");
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut store = SessionStore::open(&paths).unwrap();
        store.establish(session("tok-1", "f1")).unwrap();
        store.clear().unwrap();

        assert!(!store.is_authenticated());
        assert!(!paths.session_file().exists());
        assert!(!SessionStore::open(&paths).unwrap().is_authenticated());
    }

    #[test]
    fn test_corrupt_file_means_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.session_file(), "{ not json").unwrap();

        let store = SessionStore::open(&paths).unwrap();
        assert!(!store.is_authenticated());
        assert!(!paths.session_file().exists());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AuthToken::new("secret-value");
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
    }
}
