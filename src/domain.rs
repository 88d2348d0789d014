//! Domain models for standards indexing.
//!
//! This module contains the document header, the standards hierarchy and
//! the configuration.

mod config;
pub use config::{Config, ConfigError, DEFAULT_CLONE_PATH, DEFAULT_CONFIG};

mod header;
pub use header::{IncompleteHeader, StandardsFile, StandardsHeader};

/// The standards hierarchy and the algorithm that builds it.
pub mod tree;
pub use tree::{build, Node, StandardsTree};
