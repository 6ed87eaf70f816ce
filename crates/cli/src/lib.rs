//! CLI tool for inspecting view write routing.
//!
//! Provides commands for:
//! - Resolving the view replica a base replica writes to
//! - Printing the full base → view pairing table
//! - Listing natural replicas of a token

pub mod commands;
pub mod config;
pub mod topology;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
pub use topology::TopologyFile;
