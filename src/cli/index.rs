use std::path::PathBuf;

use anyhow::Context;
use stdidx::{Config, Format, OutputTarget};
use tracing::instrument;

use crate::cli::{instructions, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Root of the standards library [default: the configured clone path]
    #[arg(long)]
    path: Option<PathBuf>,

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
        let root = self.path.unwrap_or_else(|| config.clone_path.clone());
        let target = OutputTarget::from(self.output.unwrap_or_else(|| config.output.clone()));
        let format = self.format.unwrap_or(config.format);

        let tree = stdidx::index(&root, &target, format)
            .with_context(|| format!("failed to index {}", root.display()))?;

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
