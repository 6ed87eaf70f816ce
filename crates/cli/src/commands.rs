//! CLI subcommands.

use std::fmt;

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use corelib::partitioner::{Murmur3Partitioner, Partitioner};
use corelib::token::Murmur3Token;
use corelib::topology::ReplicaSetProvider;
use corelib::Endpoint;
use replication::ClusterMetadata;
use view::{LocalReplicas, ViewEndpointResolver, ViewTarget};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the view replica the local node forwards a view write to
    Resolve {
        #[arg(long)]
        keyspace: String,
        /// Broadcast address of the base replica doing the write
        #[arg(long)]
        local: Endpoint,
        #[command(flatten)]
        base: BaseToken,
        #[command(flatten)]
        view: ViewToken,
    },
    /// Print the base → view pairing table of the local datacenter
    Pairings {
        #[arg(long)]
        keyspace: String,
        /// Any endpoint of the datacenter to inspect
        #[arg(long)]
        local: Endpoint,
        #[command(flatten)]
        base: BaseToken,
        #[command(flatten)]
        view: ViewToken,
    },
    /// List natural replicas of a token
    Replicas {
        #[arg(long)]
        keyspace: String,
        #[command(flatten)]
        token: KeyToken,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct BaseToken {
    /// Base partition key (hashed with the Murmur3 partitioner)
    #[arg(long)]
    base_key: Option<String>,
    /// Base token
    #[arg(long)]
    base_token: Option<Murmur3Token>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ViewToken {
    /// View partition key (hashed with the Murmur3 partitioner)
    #[arg(long)]
    view_key: Option<String>,
    /// View token
    #[arg(long)]
    view_token: Option<Murmur3Token>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct KeyToken {
    /// Partition key (hashed with the Murmur3 partitioner)
    #[arg(long)]
    key: Option<String>,
    #[arg(long)]
    token: Option<Murmur3Token>,
}

fn token_of(
    key: Option<&str>,
    token: Option<Murmur3Token>,
    (key_flag, token_flag): (&str, &str),
) -> anyhow::Result<Murmur3Token> {
    match (key, token) {
        (Some(key), None) => Ok(Murmur3Partitioner.partition(key.as_bytes())),
        (None, Some(token)) => Ok(token),
        _ => bail!("exactly one of --{key_flag} or --{token_flag} is required"),
    }
}

impl BaseToken {
    fn token(&self) -> anyhow::Result<Murmur3Token> {
        token_of(self.base_key.as_deref(), self.base_token, ("base-key", "base-token"))
    }
}

impl ViewToken {
    fn token(&self) -> anyhow::Result<Murmur3Token> {
        token_of(self.view_key.as_deref(), self.view_token, ("view-key", "view-token"))
    }
}

impl KeyToken {
    fn token(&self) -> anyhow::Result<Murmur3Token> {
        token_of(self.key.as_deref(), self.token, ("key", "token"))
    }
}

/// Output of a command.
#[derive(Debug)]
pub enum CommandResult {
    Resolved {
        base: Murmur3Token,
        view: Murmur3Token,
        target: ViewTarget,
    },
    Pairings {
        datacenter: String,
        pairs: LocalReplicas,
    },
    Replicas {
        token: Murmur3Token,
        endpoints: Vec<Endpoint>,
    },
}

impl Command {
    pub fn execute(&self, metadata: &ClusterMetadata) -> anyhow::Result<CommandResult> {
        match self {
            Command::Resolve {
                keyspace,
                local,
                base,
                view,
            } => {
                let (base, view) = (base.token()?, view.token()?);
                let target = ViewEndpointResolver::with_topology(*local, metadata)
                    .resolve_target(keyspace, &base, &view)
                    .with_context(|| format!("resolving view endpoint for {local}"))?;
                Ok(CommandResult::Resolved { base, view, target })
            }
            Command::Pairings {
                keyspace,
                local,
                base,
                view,
            } => {
                let pairs = ViewEndpointResolver::with_topology(*local, metadata).pairings(
                    keyspace,
                    &base.token()?,
                    &view.token()?,
                )?;
                Ok(CommandResult::Pairings {
                    datacenter: metadata.snitch().location_of(local).datacenter,
                    pairs,
                })
            }
            Command::Replicas { keyspace, token } => {
                let token = token.token()?;
                let endpoints = metadata.natural_endpoints(keyspace, &token)?;
                Ok(CommandResult::Replicas { token, endpoints })
            }
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Resolved { base, view, target } => {
                write!(f, "base token {base} -> view token {view}: {target}")
            }
            CommandResult::Pairings { datacenter, pairs } => {
                writeln!(f, "datacenter {datacenter}")?;
                if pairs.base().len() != pairs.view().len() {
                    writeln!(
                        f,
                        "  unbalanced: {} base vs {} view replicas",
                        pairs.base().len(),
                        pairs.view().len()
                    )?;
                }
                for (base, view) in pairs.iter() {
                    writeln!(f, "  {base} -> {view}")?;
                }
                Ok(())
            }
            CommandResult::Replicas { token, endpoints } => {
                write!(f, "token {token}:")?;
                for (rank, endpoint) in endpoints.iter().enumerate() {
                    write!(f, "\n  {}. {endpoint}", rank + 1)?;
                }
                Ok(())
            }
        }
    }
}
