//! Session configuration loaded from `session.toml`.

use std::path::{Path, PathBuf};

use rewind_core::HistoryConfig;
use serde::Deserialize;
use thiserror::Error;

/// Top-level session configuration.
///
/// ```toml
/// [history]
/// max_undo = 64
///
/// [session]
/// drag_frames = 12
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub history: HistoryConfig,
    pub session: SessionSettings,
}

/// Parameters of the scripted session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Number of pointer samples in the simulated drag.
    pub drag_frames: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { drag_frames: 12 }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

impl SessionConfig {
    /// Checks values that parse but make no sense.
    pub fn validate(&self) -> Result<(), String> {
        if self.history.max_undo == Some(0) {
            return Err("history.max_undo must be at least 1".into());
        }
        Ok(())
    }
}

/// Load a session config from a TOML file.
pub fn load(path: &Path) -> Result<SessionConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    let config: SessionConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    config.validate().map_err(|reason| ConfigError::Invalid {
        path: path.to_owned(),
        reason,
    })?;
    Ok(config)
}

/// Load session config, falling back to defaults if the file is missing or broken.
pub fn load_or_default(path: &Path) -> SessionConfig {
    match load(path) {
        Ok(config) => {
            log::info!(
                "Loaded session config from {} (max_undo: {:?}, drag_frames: {})",
                path.display(),
                config.history.max_undo,
                config.session.drag_frames
            );
            config
        }
        Err(e) => {
            log::warn!("No session config ({e}), using defaults");
            SessionConfig::default()
        }
    }
}
