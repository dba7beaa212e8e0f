use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PostameError;
use crate::models::profile::Profile;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub profile: Profile,
}

/// Login state kept on disk between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self, PostameError> {
        // Check the XDG_CACHE_HOME environment variable first
        let base_cache_dir = match env::var_os("XDG_CACHE_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = env::var_os("HOME").ok_or_else(|| {
                    PostameError::Config("Home environment variable not set".to_string())
                })?;
                Path::new(&home).join(".cache")
            }
        };

        let app_cache_dir = base_cache_dir.join("postame");
        fs::create_dir_all(&app_cache_dir).map_err(|e| {
            PostameError::Session(format!("Failed to create cache directory: {}", e))
        })?;

        Ok(Self::new(app_cache_dir.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>, PostameError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data)
                .map(Some)
                .map_err(|e| PostameError::Session(format!("Failed to parse session file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PostameError::Session(format!(
                "Failed to read session file: {}",
                e
            ))),
        }
    }

    /// The stored session, or `NotLoggedIn`.
    pub fn require(&self) -> Result<Session, PostameError> {
        self.load()?.ok_or(PostameError::NotLoggedIn)
    }

    pub fn save(&self, session: &Session) -> Result<(), PostameError> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| PostameError::Session(format!("Failed to serialize session: {}", e)))?;

        fs::write(&self.path, json)
            .map_err(|e| PostameError::Session(format!("Failed to write session file: {}", e)))?;

        tracing::debug!(path = %self.path.display(), user = %session.profile.name, "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), PostameError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PostameError::Session(format!(
                "Failed to remove session file: {}",
                e
            ))),
        }
    }
}
