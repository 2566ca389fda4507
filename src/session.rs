//! Session Storage
//!
//! The only client-side state that outlives a view: the auth token, the
//! user's role, id and name. Stored as flat string entries under fixed keys
//! so the browser build can keep them in `localStorage` and the CLI in a
//! small JSON file.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{AuthResponse, Role};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USER_ID_KEY: &str = "userId";
pub const USERNAME_KEY: &str = "username";

/// Every key a session writes
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, ROLE_KEY, USER_ID_KEY, USERNAME_KEY];

/// An authenticated user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl Session {
    /// Build a session from a login/registration response.
    ///
    /// `entered_username` covers registration responses that omit it.
    pub fn from_auth(resp: AuthResponse, entered_username: Option<&str>) -> Self {
        let username = resp
            .username
            .or_else(|| entered_username.map(str::to_string))
            .filter(|u| !u.is_empty());

        Self {
            token: resp.token,
            role: resp.role,
            user_id: Some(resp.user_id).filter(|id| !id.is_empty()),
            username,
        }
    }

    /// Rebuild a session from stored entries.
    ///
    /// Authenticated only when a non-empty token and a known role are both
    /// present.
    pub fn from_entries(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let token = get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let role = get(ROLE_KEY)?.parse().ok()?;

        Some(Self {
            token,
            role,
            user_id: get(USER_ID_KEY).filter(|v| !v.is_empty()),
            username: get(USERNAME_KEY).filter(|v| !v.is_empty()),
        })
    }

    /// Flatten into key/value entries for storage
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            (TOKEN_KEY, self.token.clone()),
            (ROLE_KEY, self.role.as_str().to_string()),
        ];
        if let Some(id) = &self.user_id {
            entries.push((USER_ID_KEY, id.clone()));
        }
        if let Some(name) = &self.username {
            entries.push((USERNAME_KEY, name.clone()));
        }
        entries
    }

    /// User id, or [`ApiError::MissingSession`] when the login response
    /// did not carry one
    pub fn require_user_id(&self) -> Result<&str, ApiError> {
        self.user_id.as_deref().ok_or(ApiError::MissingSession)
    }

    /// Name for the navbar greeting
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("there")
    }
}

/// Session storage errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write session: {0}")]
    Write(String),
}

/// Where a session lives between runs
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry, for inspecting what was written
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<Session> {
        let entries = self.entries.borrow();
        Session::from_entries(|k| entries.get(k).cloned())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let mut entries = self.entries.borrow_mut();
        for key in SESSION_KEYS {
            entries.remove(key);
        }
        for (key, value) in session.entries() {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = self.entries.borrow_mut();
        for key in SESSION_KEYS {
            entries.remove(key);
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileSessionStore;

#[cfg(feature = "native")]
mod file {
    use super::*;
    use std::path::{Path, PathBuf};

    /// JSON file holding the same flat entries the browser keeps
    #[derive(Debug, Clone)]
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `~/.local/share/counselhub/session.json` or a local fallback
        pub fn default_path() -> PathBuf {
            dirs::data_local_dir()
                .map(|p| p.join("counselhub").join("session.json"))
                .unwrap_or_else(|| PathBuf::from("./counselhub_session.json"))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_entries(&self) -> BTreeMap<String, String> {
            std::fs::read_to_string(&self.path)
                .ok()
                .and_then(|content| serde_json::from_str(&content).ok())
                .unwrap_or_default()
        }
    }

    impl SessionStore for FileSessionStore {
        fn load(&self) -> Option<Session> {
            let entries = self.read_entries();
            Session::from_entries(|k| entries.get(k).cloned())
        }

        fn save(&self, session: &Session) -> Result<(), SessionError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SessionError::Unavailable(e.to_string()))?;
            }

            let entries: BTreeMap<&str, String> = session.entries().into_iter().collect();
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| SessionError::Write(e.to_string()))?;

            std::fs::write(&self.path, json).map_err(|e| SessionError::Write(e.to_string()))?;
            tracing::debug!(path = %self.path.display(), "session saved");
            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SessionError::Write(e.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(role: Role) -> AuthResponse {
        AuthResponse {
            token: "jwt".into(),
            role,
            user_id: "u1".into(),
            username: None,
        }
    }

    #[test]
    fn test_from_auth_uses_entered_username() {
        let session = Session::from_auth(auth(Role::Client), Some("jo"));
        assert_eq!(session.username.as_deref(), Some("jo"));
        assert_eq!(session.require_user_id().unwrap(), "u1");
    }

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        let session = Session::from_auth(auth(Role::Counselor), Some("lee"));
        store.save(&session).unwrap();

        assert_eq!(store.get(ROLE_KEY).as_deref(), Some("counselor"));
        assert_eq!(store.load(), Some(session));

        store.clear().unwrap();
        assert!(store.load().is_none());
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_requires_token_and_known_role() {
        let only_token = |k: &str| (k == TOKEN_KEY).then(|| "jwt".to_string());
        assert!(Session::from_entries(only_token).is_none());

        let bad_role = |k: &str| match k {
            TOKEN_KEY => Some("jwt".to_string()),
            ROLE_KEY => Some("admin".to_string()),
            _ => None,
        };
        assert!(Session::from_entries(bad_role).is_none());

        let no_user = |k: &str| match k {
            TOKEN_KEY => Some("jwt".to_string()),
            ROLE_KEY => Some("client".to_string()),
            _ => None,
        };
        let session = Session::from_entries(no_user).unwrap();
        assert!(matches!(session.require_user_id(), Err(ApiError::MissingSession)));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let session = Session::from_auth(auth(Role::Client), Some("amy"));
        FileSessionStore::new(&path).save(&session).unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.load(), Some(session));

        reopened.clear().unwrap();
        assert!(reopened.load().is_none());
        // clearing twice is fine
        reopened.clear().unwrap();
    }
}
