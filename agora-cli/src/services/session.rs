//! Logged-in user persisted between invocations

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Session {
    pub fn for_user(username: impl Into<String>) -> Self {
        Session {
            username: Some(username.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the session; a missing file is an empty session
    pub fn load(&self) -> CliResult<Session> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                CliError::Session(format!("{} is not a valid session file: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> CliResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(session).map_err(|e| CliError::Session(e.to_string()))?;
        fs::write(&self.path, contents)?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> CliResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn current_user(&self) -> CliResult<Option<String>> {
        Ok(self.load()?.username.filter(|u| !u.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.toml"));

        assert_eq!(store.load().unwrap(), Session::default());

        store.save(&Session::for_user("ada")).unwrap();
        assert_eq!(store.current_user().unwrap().as_deref(), Some("ada"));

        store.clear().unwrap();
        assert_eq!(store.current_user().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(&path, "username = [").unwrap();

        assert!(matches!(SessionStore::new(path).load(), Err(CliError::Session(_))));
    }
}
