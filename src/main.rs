//! `std-index`: index a library of coding standards for an agent to walk.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
