use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PostameError;

pub const DEFAULT_API_BASE: &str = "https://v2.api.noroff.dev";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, PostameError> {
        let config_path = dirs::home_dir()
            .ok_or_else(|| PostameError::Config("Could not find home directory".to_string()))?
            .join(".config/postame/config.json");
        Ok(config_path)
    }

    /// Config file (defaults when absent) with environment overrides on top.
    pub fn load() -> Result<Self, PostameError> {
        let mut config = Self::load_from(&Self::default_path()?)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, PostameError> {
        match fs::read_to_string(path) {
            Ok(data) => Self::parse(&data).map_err(|e| {
                PostameError::Config(format!(
                    "Failed to parse config JSON at {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(PostameError::Config(format!(
                "Failed to open config file at {}: {}",
                path.display(),
                e
            ))),
        }
    }

    // A bare `[]` would otherwise pass as a struct with every field defaulted.
    fn parse(data: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(data).map_err(|e| e.to_string())?;
        if !value.is_object() {
            return Err("expected a JSON object".to_string());
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    pub fn save(&self) -> Result<(), PostameError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PostameError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self)?;
        fs::write(path, json).map_err(|e| {
            PostameError::Config(format!(
                "Failed to write config file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), PostameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("POSTAME_API_BASE") {
            self.api_base = base;
        }
        if let Some(key) = lookup("POSTAME_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(raw) = lookup("POSTAME_TIMEOUT_SECS") {
            self.timeout_secs = raw.parse().map_err(|_| {
                PostameError::Config(format!("POSTAME_TIMEOUT_SECS is not a number: {}", raw))
            })?;
        }
        Ok(())
    }
}
