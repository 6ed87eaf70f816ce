//! Command-line configuration.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;

use crate::commands::Command;
use crate::topology::TopologyFile;

#[derive(Debug, Parser)]
#[command(
    name = "view-replica",
    version,
    about = "Resolve which view replica a base replica forwards writes to"
)]
pub struct CliConfig {
    /// Topology file (JSON): nodes, keyspaces and pending ranges
    #[arg(short, long)]
    pub topology: PathBuf,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose);

        let topology = TopologyFile::load(&self.topology)?;
        let metadata = topology
            .into_metadata()
            .with_context(|| format!("invalid topology in {}", self.topology.display()))?;

        let result = self.command.execute(&metadata)?;
        println!("{result}");
        Ok(())
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
