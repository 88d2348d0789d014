use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::storage::{Format, DEFAULT_OUTPUT};

/// The file configuration is read from when none is given explicitly.
pub const DEFAULT_CONFIG: &str = "std-index.toml";

/// The directory a standards library is cloned into by default.
pub const DEFAULT_CLONE_PATH: &str = ".stdidx";

/// Configuration for indexing a standards library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The directory the standards library is cloned into, and indexed from.
    pub clone_path: PathBuf,

    /// The file the standards tree is written to.
    ///
    /// `-` writes to standard output.
    pub output: PathBuf,

    /// The serialization format of the standards tree.
    pub format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clone_path: default_clone_path(),
            output: default_output(),
            format: Format::default(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}", path.display())]
    Read {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid.
    #[error("failed to parse config file {}", path.display())]
    Parse {
        /// The configuration file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration from `path` if the file exists, falling back
    /// to the defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file found, using defaults");
            Ok(Self::default())
        }
    }
}

fn default_clone_path() -> PathBuf {
    PathBuf::from(DEFAULT_CLONE_PATH)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_clone_path")]
        clone_path: PathBuf,

        #[serde(default = "default_output")]
        output: PathBuf,

        #[serde(default)]
        format: Format,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                clone_path,
                output,
                format,
            } => Self {
                clone_path,
                output,
                format,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            clone_path: config.clone_path,
            output: config.output,
            format: config.format,
        }
    }
}
