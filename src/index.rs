//! The indexing pipeline: collect, build, write.

use std::path::Path;

use tracing::instrument;

use crate::{
    domain::{tree, StandardsTree},
    storage::{self, CollectError, Format, OutputTarget, WriteError},
};

/// Errors that can occur when indexing a standards library.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The library could not be read.
    #[error(transparent)]
    Collect(#[from] CollectError),
    /// The standards tree could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Builds the standards tree for the library rooted at `root`.
///
/// # Errors
///
/// Returns an error if the library cannot be read.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn generate(root: &Path) -> Result<StandardsTree, CollectError> {
    tracing::debug!("parsing standards files");
    let files = storage::collect(root)?;

    tracing::debug!(count = files.len(), "creating standards tree");
    let tree = tree::build(files);

    tracing::info!(
        roots = tree.nodes.len(),
        nodes = tree.len(),
        "generated standards tree"
    );
    Ok(tree)
}

/// Indexes the library rooted at `root` and writes the tree to `target`.
///
/// Nothing is written unless the whole library was read successfully.
///
/// # Errors
///
/// Returns an error if the library cannot be read or the tree cannot be
/// written.
#[instrument(skip(root), fields(root = %root.display()))]
pub fn index(
    root: &Path,
    target: &OutputTarget,
    format: Format,
) -> Result<StandardsTree, IndexError> {
    tracing::info!("generating standards index");

    let tree = generate(root)?;
    storage::write(&tree, target, format)?;

    tracing::info!(%target, "successfully generated standards index");
    Ok(tree)
}
