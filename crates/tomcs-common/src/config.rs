//! Project configuration model for the tomcs designer.
//!
//! Configuration lives in an optional `tomcs.json` next to the project.
//! Every field has a default, so a partial file (or no file) is valid.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, TomcsError};
use crate::types::{Position, ThemeName};

/// Root configuration for a tomcs project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomcsConfig {
    /// Project name shown in the designer title.
    pub name: String,
    /// Project version.
    pub version: String,
    /// Color theme for the designer.
    pub theme: ThemeName,
    /// Period between two runs of the same command binding, in milliseconds.
    pub poll_interval_ms: u64,
    /// Where the canvas places its tracked element before any drag.
    pub default_position: Position,
    /// Number of rows the component picker shows at once.
    pub picker_window: usize,
    /// Output width used when converting images, in character columns.
    pub image_width: u32,
    /// Image placed by the image tool.
    pub image: Option<PathBuf>,
    /// Component names offered by the library picker.
    pub registry: Vec<String>,
    /// Command bindings, keyed by the id of the component they feed.
    pub bindings: BTreeMap<String, String>,
}

impl Default for TomcsConfig {
    fn default() -> Self {
        Self {
            name: "my-tomcs-app".to_string(),
            version: "0.1.0".to_string(),
            theme: ThemeName::default(),
            poll_interval_ms: constants::DEFAULT_POLL_INTERVAL_MS,
            default_position: Position::new(
                constants::DEFAULT_POSITION_X,
                constants::DEFAULT_POSITION_Y,
            ),
            picker_window: constants::DEFAULT_PICKER_WINDOW,
            image_width: constants::DEFAULT_IMAGE_WIDTH,
            image: None,
            registry: constants::DEFAULT_REGISTRY
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            bindings: BTreeMap::new(),
        }
    }
}

impl TomcsConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let raw = std::fs::read_to_string(path).map_err(|e| TomcsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Writes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        std::fs::write(path, raw).map_err(|e| TomcsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "configuration written");
        Ok(())
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`TomcsError::Config`] for a zero poll interval, picker
    /// window, or image width, or for a binding with an empty command.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(TomcsError::Config {
                message: "poll_interval_ms must be greater than zero".into(),
            });
        }
        if self.picker_window == 0 {
            return Err(TomcsError::Config {
                message: "picker_window must be at least 1".into(),
            });
        }
        if self.image_width == 0 {
            return Err(TomcsError::Config {
                message: "image_width must be at least 1".into(),
            });
        }
        if let Some((id, _)) = self.bindings.iter().find(|(_, cmd)| cmd.trim().is_empty()) {
            return Err(TomcsError::Config {
                message: format!("binding {id} has an empty command"),
            });
        }
        Ok(())
    }
}

/// Parses an `id=command` pair as given on the command line.
///
/// # Errors
///
/// Returns [`TomcsError::Config`] if the separator is missing or either
/// side is empty.
pub fn parse_binding(raw: &str) -> Result<(String, String)> {
    let (id, command) = raw.split_once('=').ok_or_else(|| TomcsError::Config {
        message: format!("binding must look like id=command: {raw}"),
    })?;
    let (id, command) = (id.trim(), command.trim());
    if id.is_empty() || command.is_empty() {
        return Err(TomcsError::Config {
            message: format!("binding must look like id=command: {raw}"),
        });
    }
    Ok((id.to_string(), command.to_string()))
}
