//! Settings for the demo server.
//!
//! Loaded from a TOML file; every field has a default, and `GAMES_BIND`
//! overrides the bind address.
//!
//! ```toml
//! store_name = "games"
//! bind = "127.0.0.1:3000"
//! log_filter = "info,games_cqrs=debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding `bind`.
pub const BIND_ENV: &str = "GAMES_BIND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the in-memory store, used in traces.
    pub store_name: String,
    /// Address the HTTP transport binds to.
    pub bind: String,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_name: "games".to_string(),
            bind: "127.0.0.1:3000".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read settings from `path`, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&input)?.with_env())
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.is_empty()) {
            self.bind = bind;
        }
        self
    }
}
