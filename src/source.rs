//! Acquisition of a standards library from a git repository.
//!
//! The indexer does not care how the directory tree it reads came to be; this
//! module only fetches it. Parent references inside the library are relative
//! to the library root, so the clone location has no effect on the tree.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::instrument;

use crate::{
    domain::StandardsTree,
    index::{self, IndexError},
    storage::{Format, OutputTarget},
};

/// A branch or tag to check out after cloning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRef {
    /// A branch name.
    Branch(String),
    /// A tag name.
    Tag(String),
}

impl GitRef {
    fn name(&self) -> &str {
        match self {
            Self::Branch(name) | Self::Tag(name) => name,
        }
    }
}

/// A remote standards library and where to clone it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepository {
    /// The URL of the repository.
    pub repository: String,
    /// The branch or tag to check out. The remote's default branch is used
    /// when this is `None`.
    pub reference: Option<GitRef>,
    /// The directory to clone into.
    pub clone_path: PathBuf,
}

impl GitRepository {
    /// The `git` invocation that clones this repository.
    ///
    /// The clone path is passed through as an `OsStr`, so paths that are not
    /// valid UTF-8 reach `git` unchanged.
    #[must_use]
    pub fn clone_command(&self) -> Command {
        let mut command = Command::new("git");
        command
            .arg("clone")
            .arg(&self.repository)
            .arg(&self.clone_path);
        if let Some(reference) = &self.reference {
            // `--branch` accepts tags as well as branches.
            command.args(["--branch", reference.name()]);
        }
        command
    }
}

/// Errors that can occur when fetching a standards library.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// `git` could not be started.
    #[error("failed to run git")]
    Spawn(#[source] io::Error),
    /// `git clone` exited unsuccessfully.
    #[error("git clone of {repository} failed with {status}")]
    Clone {
        /// The URL of the repository.
        repository: String,
        /// The exit status of `git`.
        status: std::process::ExitStatus,
    },
    /// The existing clone could not be removed.
    #[error("failed to remove existing standards library at {}", path.display())]
    Remove {
        /// The clone directory.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Populates a directory with the contents of a repository.
pub trait GitCloner {
    /// Clones `repository` into its `clone_path`, which does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be cloned.
    fn clone_repository(&self, repository: &GitRepository) -> Result<(), SourceError>;
}

/// Clones repositories by running the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecGitCloner;

impl GitCloner for ExecGitCloner {
    fn clone_repository(&self, repository: &GitRepository) -> Result<(), SourceError> {
        tracing::info!(
            url = %repository.repository,
            path = %repository.clone_path.display(),
            reference = ?repository.reference,
            "cloning git repository"
        );

        let status = repository
            .clone_command()
            .status()
            .map_err(SourceError::Spawn)?;

        if status.success() {
            Ok(())
        } else {
            Err(SourceError::Clone {
                repository: repository.repository.clone(),
                status,
            })
        }
    }
}

/// Errors that can occur when syncing a standards library.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The library could not be fetched.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The fetched library could not be indexed.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Fetches a fresh copy of a standards library and indexes it.
///
/// Any existing clone at the clone path is removed first.
///
/// # Errors
///
/// Returns an error if the existing clone cannot be removed, the repository
/// cannot be cloned, or the clone cannot be indexed.
#[instrument(skip(cloner, repository), fields(repository = %repository.repository))]
pub fn sync(
    cloner: &impl GitCloner,
    repository: &GitRepository,
    target: &OutputTarget,
    format: Format,
) -> Result<StandardsTree, SyncError> {
    tracing::info!(reference = ?repository.reference, "syncing standards library");

    remove_existing(&repository.clone_path)?;
    cloner.clone_repository(repository)?;

    let tree = index::index(&repository.clone_path, target, format)?;

    tracing::info!("successfully synced standards library");
    Ok(tree)
}

fn remove_existing(path: &Path) -> Result<(), SourceError> {
    if !path.exists() {
        return Ok(());
    }
    tracing::info!(clone_path = %path.display(), "removing existing standards library");
    fs::remove_dir_all(path).map_err(|source| SourceError::Remove {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::{OsStr, OsString};

    use super::*;

    fn repository(reference: Option<GitRef>) -> GitRepository {
        GitRepository {
            repository: "https://example.com/standards.git".to_string(),
            reference,
            clone_path: PathBuf::from(".stdidx"),
        }
    }

    fn args(repository: &GitRepository) -> Vec<OsString> {
        let command = repository.clone_command();
        command.get_args().map(OsStr::to_os_string).collect()
    }

    #[test]
    fn clone_command_without_reference() {
        let repository = repository(None);
        let command = repository.clone_command();

        assert_eq!(command.get_program(), "git");
        assert_eq!(
            args(&repository),
            ["clone", "https://example.com/standards.git", ".stdidx"]
        );
    }

    #[test]
    fn clone_command_with_branch() {
        let repository = repository(Some(GitRef::Branch("main".to_string())));

        assert_eq!(args(&repository)[3..], ["--branch", "main"]);
    }

    #[test]
    fn tags_are_checked_out_with_branch_flag() {
        let repository = repository(Some(GitRef::Tag("v1.2.0".to_string())));

        assert_eq!(args(&repository)[3..], ["--branch", "v1.2.0"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_clone_path_is_passed_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let clone_path = OsStr::from_bytes(b"clone-\xff");
        let repository = GitRepository {
            clone_path: PathBuf::from(clone_path),
            ..repository(None)
        };

        assert_eq!(args(&repository)[2].as_os_str(), clone_path);
    }

    #[test]
    fn remove_existing_ignores_missing_directory() {
        let dir = tempfile::tempdir().unwrap();

        remove_existing(&dir.path().join("missing")).unwrap();
    }

    #[test]
    fn remove_existing_deletes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let clone = dir.path().join("clone");
        fs::create_dir_all(clone.join("nested")).unwrap();
        fs::write(clone.join("nested/GENERAL.md"), "# General").unwrap();

        remove_existing(&clone).unwrap();

        assert!(!clone.exists());
    }
}
