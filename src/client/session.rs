use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ClientError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    token: Option<String>,
}

/// Session token kept on disk between client runs.
///
/// Loaded once by [`SessionStore::open`]; every change is written back
/// immediately. Nothing here is global: each client owns its own store.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    token: Option<String>,
}

impl SessionStore {
    /// Loads the session at `path`. A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let token = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<PersistedSession>(&bytes)?.token,
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, token })
    }

    /// A session that is never written to disk.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<(), ClientError> {
        self.token = Some(token.into());
        self.save()
    }

    /// Forgets the token. The server keeps accepting it until it expires.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.token = None;
        self.save()
    }

    fn save(&self) -> Result<(), ClientError> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let persisted = PersistedSession {
            token: self.token.clone(),
        };
        fs::write(&self.path, serde_json::to_vec(&persisted)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("taskgate-session-{}", Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let store = SessionStore::open(scratch_path()).unwrap();
        assert!(!store.is_logged_in());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_token_survives_reopen() {
        let path = scratch_path();

        let mut store = SessionStore::open(&path).unwrap();
        store.set_token("abc.def.ghi").unwrap();

        let mut reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.token(), Some("abc.def.ghi"));

        reopened.logout().unwrap();
        assert_eq!(SessionStore::open(&path).unwrap().token(), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not json").unwrap();

        assert!(matches!(SessionStore::open(&path), Err(ClientError::Json(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_ephemeral_session_never_touches_disk() {
        let mut store = SessionStore::ephemeral();
        store.set_token("t").unwrap();
        assert_eq!(store.token(), Some("t"));
        store.logout().unwrap();
        assert!(!store.is_logged_in());
    }
}
