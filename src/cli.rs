use std::path::PathBuf;

mod index;
mod instructions;
mod sync;
mod terminal;

use clap::ArgAction;
use instructions::Instructions;
use stdidx::{domain::DEFAULT_CONFIG, Config};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file [default: std-index.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Don't print the suggested agent instructions after indexing
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(&PathBuf::from(DEFAULT_CONFIG))?,
        };

        self.command.run(&config, self.quiet)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // Diagnostics go to stderr so the tree can be written to stdout.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Clone a standards library and index it
    ///
    /// Any existing clone is removed first.
    Sync(sync::Command),

    /// Index a standards library that is already on disk
    Index(index::Command),

    /// Print the suggested instructions for an agent consuming the index
    Instructions(Instructions),
}

impl Command {
    fn run(self, config: &Config, quiet: bool) -> anyhow::Result<()> {
        match self {
            Self::Sync(command) => command.run(config, quiet)?,
            Self::Index(command) => command.run(config, quiet)?,
            Self::Instructions(command) => command.run(config),
        }
        Ok(())
    }
}
