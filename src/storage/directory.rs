//! Discovery of standards documents in a directory tree.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

use crate::{
    domain::StandardsFile,
    storage::markdown::{self, ExtractError, Extracted},
};

/// The directory tree could not be indexed.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// A directory or entry could not be visited.
    #[error("failed to walk {}", path.display())]
    Walk {
        /// The entry that could not be visited.
        path: PathBuf,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },
    /// A markdown document could not be read.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Collects every markdown document with a valid header under `root`.
///
/// Documents without a valid header are skipped with a warning. The parent
/// reference of every collected header is anchored at `root`, so it can be
/// compared directly with the `path` of the other collected documents,
/// regardless of where the tree was checked out.
///
/// Entries are visited in file name order, so repeated runs over the same
/// tree yield the same sequence.
///
/// # Errors
///
/// Fails on the first directory that cannot be walked or markdown file that
/// cannot be read.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn collect(root: &Path) -> Result<Vec<StandardsFile>, CollectError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| CollectError::Walk {
            path: source
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source,
        })?;

        if !is_markdown(&entry) {
            continue;
        }

        let path = entry.into_path().clean();
        match markdown::extract(&path)? {
            Extracted::Header(header) => files.push(StandardsFile::new(path, header)),
            Extracted::NoHeader(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    %reason,
                    "found markdown file without valid header. skipping."
                );
            }
        }
    }

    for file in &mut files {
        file.header.anchor_parent(root);
    }

    tracing::debug!(count = files.len(), "collected standards files");
    Ok(files)
}

fn is_markdown(entry: &DirEntry) -> bool {
    !entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".md"))
}
