//! The `.gitlet/config` file.

use std::fs;
use std::io;
use std::path::Path;

use gitlet_core::merge::MergeBaseStrategy;
use gitlet_core::repo::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Repository format version written by `init`.
pub const FORMAT_VERSION: u32 = 1;

/// Per-repository settings. Missing sections and keys take their defaults.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub core: CoreConfig,
    pub merge: MergeConfig,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    pub format_version: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            format_version: FORMAT_VERSION,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct MergeConfig {
    /// How `merge` picks its base commit.
    pub base: MergeBaseStrategy,
}

impl Config {
    /// Read the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Config> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };

        let config: Config = toml::from_str(&text).map_err(|err| Error::Corrupt {
            record: "config".to_string(),
            reason: err.to_string(),
        })?;

        if config.core.format_version != FORMAT_VERSION {
            warn!(
                found = config.core.format_version,
                expected = FORMAT_VERSION,
                "unrecognized repository format version"
            );
        }

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string(self).map_err(|err| Error::OtherError(Box::new(err)))?;
        fs::write(path, text).map_err(|e| e.into())
    }
}
