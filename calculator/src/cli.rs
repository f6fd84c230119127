use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

/// Derives the largest power-of-ten ONE that keeps the token contract's
/// largest computation below 2 ** 256 - 1.
#[derive(Debug, Parser)]
#[command(name = "one-calculator", version)]
pub struct Cli {
    /// TOML config file, defaults to ./config.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum total supply, in whole tokens
    #[arg(long, global = true)]
    pub max_total_tokens: Option<u64>,

    /// Minimum collateral to total supply ratio, in (0, 1]
    #[arg(long, global = true)]
    pub min_collateral_ratio: Option<f64>,

    /// Maximum epsilon, in [0, 1)
    #[arg(long, global = true)]
    pub max_epsilon: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Derive ONE and print every intermediate value (default)
    Derive,
    /// Derive ONE, then replay equal-split yield distributions against it
    Audit {
        /// Round counts to replay, comma separated
        #[arg(long, value_delimiter = ',')]
        rounds: Vec<u32>,
    },
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_total_tokens) = self.max_total_tokens {
            config.bounds.max_total_tokens = max_total_tokens;
        }
        if let Some(min_collateral_ratio) = self.min_collateral_ratio {
            config.bounds.min_collateral_ratio = min_collateral_ratio;
        }
        if let Some(max_epsilon) = self.max_epsilon {
            config.bounds.max_epsilon = max_epsilon;
        }
        if let Some(Command::Audit { rounds }) = &self.command {
            if !rounds.is_empty() {
                config.audit.rounds = rounds.clone();
            }
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Derive)
    }
}
