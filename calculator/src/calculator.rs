pub mod cli;
pub mod config;
pub mod report;

pub use cli::{Cli, Command};
pub use config::{AuditConfig, BoundsConfig, Config, DEFAULT_CONFIG_FILE};
pub use report::{report_audit, report_derivation};
