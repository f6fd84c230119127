use std::path::Path;

use anyhow::{anyhow, Context, Result};
use common_constants::{
    DEFAULT_AUDIT_ROUNDS, DEFAULT_INIT_TOTAL_SUPPLY, DEFAULT_MAX_EPSILON,
    DEFAULT_MAX_TOTAL_TOKENS, DEFAULT_MIN_COLLATERAL_RATIO, DEFAULT_TOTAL_YIELD, WAD,
    WAD_PRECISION,
};
use common_distribution::Deployment;
use common_math::Bounds;
use log::info;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Contract limits, in whole tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub max_total_tokens: u64,
    pub token_decimals: u32,
    pub min_collateral_ratio: f64,
    pub max_epsilon: f64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            max_total_tokens: (DEFAULT_MAX_TOTAL_TOKENS / WAD) as u64,
            token_decimals: WAD_PRECISION,
            min_collateral_ratio: DEFAULT_MIN_COLLATERAL_RATIO,
            max_epsilon: DEFAULT_MAX_EPSILON,
        }
    }
}

/// Deployment replayed by the distribution audit, in whole tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub init_total_supply: u64,
    pub total_yield: u64,
    pub rounds: Vec<u32>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            init_total_supply: (DEFAULT_INIT_TOTAL_SUPPLY / WAD) as u64,
            total_yield: (DEFAULT_TOTAL_YIELD / WAD) as u64,
            rounds: DEFAULT_AUDIT_ROUNDS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bounds: BoundsConfig,
    pub audit: AuditConfig,
}

impl Config {
    /// Deserializes config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Loads the given file, or `config.toml` when present, or the shipped defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("using {}", DEFAULT_CONFIG_FILE);
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            },
            None => Ok(Self::default()),
        }
    }

    pub fn to_bounds(&self) -> Result<Bounds> {
        let max_total_tokens = to_units(
            self.bounds.max_total_tokens,
            self.bounds.token_decimals,
        )?;
        Bounds::new(
            max_total_tokens,
            self.bounds.min_collateral_ratio,
            self.bounds.max_epsilon,
        )
        .context("invalid bounds")
    }

    pub fn to_deployment(&self) -> Result<Deployment> {
        Ok(Deployment {
            init_total_supply: to_units(self.audit.init_total_supply, self.bounds.token_decimals)?,
            total_yield: to_units(self.audit.total_yield, self.bounds.token_decimals)?,
        })
    }
}

/// Whole tokens to the smallest token unit.
pub fn to_units(tokens: u64, decimals: u32) -> Result<u128> {
    10u128
        .checked_pow(decimals)
        .and_then(|unit| unit.checked_mul(u128::from(tokens)))
        .ok_or_else(|| anyhow!("{} tokens with {} decimals overflow u128", tokens, decimals))
}
