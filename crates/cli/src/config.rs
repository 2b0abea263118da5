//! `hindsight.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [data_converter]
//! endpoint = "http://localhost:8888"
//! auth_token = "..."
//! timeout_secs = 10
//!
//! [display]
//! default_view = "summary"
//! namespace = "default"
//! ```

use std::path::{Path, PathBuf};

use hindsight_codec::ConverterConfig;
use hindsight_interchange::EventView;
use serde::Deserialize;

/// Read when `--config` is not given and the file exists.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "hindsight.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct HindsightConfig {
    #[serde(default)]
    pub data_converter: ConverterConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// `[display]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DisplayConfig {
    pub default_view: Option<EventView>,
    pub namespace: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load the explicit config file, or `./hindsight.toml` when present, or
/// defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<HindsightConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(HindsightConfig::default());
            }
            default
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    read_config(&path)
}

pub(crate) fn read_config(path: &Path) -> Result<HindsightConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
