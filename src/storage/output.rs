//! Serialization of the standards tree.

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::StandardsTree;

/// The file the tree is written to when no other output is configured.
pub const DEFAULT_OUTPUT: &str = "standards-tree.yaml";

/// The serialization format of the tree.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// YAML, the default.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Where the serialized tree is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A file, created or truncated.
    Path(PathBuf),
    /// Standard output.
    Stdout,
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self::Path(PathBuf::from(DEFAULT_OUTPUT))
    }
}

impl From<PathBuf> for OutputTarget {
    /// `-` selects standard output, anything else is a file path.
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdout
        } else {
            Self::Path(path)
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// Errors that can occur when writing the tree.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The tree could not be serialized as YAML.
    #[error("failed to serialize standards tree as YAML")]
    Yaml(#[from] serde_yaml::Error),
    /// The tree could not be serialized as JSON.
    #[error("failed to serialize standards tree as JSON")]
    Json(#[from] serde_json::Error),
    /// The output could not be written.
    #[error("failed to write {target}")]
    Io {
        /// The output that could not be written.
        target: OutputTarget,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Serializes the tree.
///
/// The output is a pure function of the tree: serializing the same tree twice
/// yields identical text.
///
/// # Errors
///
/// Returns an error if the tree cannot be represented in `format`, which
/// happens for document paths that are not valid UTF-8.
pub fn to_string(tree: &StandardsTree, format: Format) -> Result<String, WriteError> {
    match format {
        Format::Yaml => Ok(serde_yaml::to_string(tree)?),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(tree)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Writes the tree to `target`.
///
/// The tree is serialized in full before the output is opened, so a
/// serialization failure never leaves a partial file behind.
///
/// # Errors
///
/// Returns an error if the tree cannot be serialized or the output cannot be
/// written.
pub fn write(
    tree: &StandardsTree,
    target: &OutputTarget,
    format: Format,
) -> Result<(), WriteError> {
    let content = to_string(tree, format)?;
    let io_error = |source| WriteError::Io {
        target: target.clone(),
        source,
    };

    match target {
        OutputTarget::Path(path) => write_file(path, &content).map_err(io_error),
        OutputTarget::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(io_error)
        }
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
