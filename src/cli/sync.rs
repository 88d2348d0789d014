use std::path::PathBuf;

use anyhow::Context;
use stdidx::{Config, ExecGitCloner, Format, GitRef, GitRepository, OutputTarget};
use tracing::instrument;

use crate::cli::{instructions, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Git repository URL to clone
    #[arg(short, long)]
    repository: String,

    /// Branch to check out
    #[arg(short, long, conflicts_with = "tag")]
    branch: Option<String>,

    /// Tag to check out
    #[arg(short, long)]
    tag: Option<String>,

    /// Directory to clone the library into [default: .stdidx]
    #[arg(long)]
    clone_path: Option<PathBuf>,

    /// File to write the standards tree to, or '-' for stdout [default:
    /// standards-tree.yaml]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Serialization format of the standards tree [default: yaml]
    #[arg(short, long)]
    format: Option<Format>,
}

impl Command {
    #[instrument(skip(config))]
    pub fn run(self, config: &Config, quiet: bool) -> anyhow::Result<()> {
        let reference = match (self.branch, self.tag) {
            (Some(branch), _) => Some(GitRef::Branch(branch)),
            (None, Some(tag)) => Some(GitRef::Tag(tag)),
            (None, None) => None,
        };
        let repository = GitRepository {
            repository: self.repository,
            reference,
            clone_path: self.clone_path.unwrap_or_else(|| config.clone_path.clone()),
        };
        let target = OutputTarget::from(self.output.unwrap_or_else(|| config.output.clone()));
        let format = self.format.unwrap_or(config.format);

        let tree = stdidx::sync(&ExecGitCloner, &repository, &target, format)
            .with_context(|| format!("failed to sync {}", repository.repository))?;

        if target != OutputTarget::Stdout {
            println!(
                "{}",
                format!("Indexed {} standards into {target}", tree.len()).success()
            );
            if !quiet {
                instructions::print_suggestion(&target);
            }
        }

        Ok(())
    }
}
