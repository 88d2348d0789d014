//! Filesystem access: reading standards documents and writing the tree.

/// Discovery of standards documents in a directory tree.
pub mod directory;
pub mod markdown;
mod output;

pub use directory::{collect, CollectError};
pub use markdown::{extract, ExtractError, Extracted, SkipReason};
pub use output::{to_string, write, Format, OutputTarget, WriteError, DEFAULT_OUTPUT};
