//! Standards library indexing
//!
//! A standards library is a directory of markdown documents, each starting
//! with a small front matter header. Headers may name another document as
//! their parent. This crate collects the headers and arranges them into a
//! sorted hierarchy that an agent can walk top-down to find the standards
//! relevant to its work.

pub mod domain;
pub use domain::{Config, Node, StandardsFile, StandardsHeader, StandardsTree};

pub mod index;
pub use index::{generate, index, IndexError};

/// Fetching a standards library from git.
pub mod source;
pub use source::{sync, ExecGitCloner, GitCloner, GitRef, GitRepository, SyncError};

/// Filesystem access for standards documents and the standards tree.
pub mod storage;
pub use storage::{Format, OutputTarget};
