use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use common_distribution::{audit, AuditParams};
use common_math::derive;
use log::info;
use one_calculator::{report_audit, report_derivation, Cli, Command, Config};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let bounds = config.to_bounds()?;
    info!("deriving ONE for {:?}", bounds);
    let derivation = derive(&bounds).context("derivation of ONE failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report_derivation(&mut out, &derivation)?;

    if let Command::Audit { .. } = cli.command() {
        let deployment = config.to_deployment()?;
        let params = AuditParams::from_derivation(&derivation);
        for &rounds in &config.audit.rounds {
            writeln!(out)?;
            let result = audit(&deployment, &params, rounds)
                .with_context(|| format!("audit over {} rounds failed", rounds))?;
            report_audit(&mut out, &result)?;
        }
    }

    Ok(())
}
