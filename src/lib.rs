//! Tooling for Assetto Corsa Competizione dedicated servers: the preset text
//! codec, BOP feed reshaping, track/car tables, and the persisted console state.

use anyhow::Context as _;
use clap::Parser;
use serde_json::json;

pub mod bop;
pub mod commands;
pub mod data;
pub mod error;
pub mod preset;
pub mod servers;
pub mod templates;
pub mod util;

pub(crate) const USER_AGENT: &str = concat!("acc-console/", env!("CARGO_PKG_VERSION"));

/// Parse the command line, run one command, and persist the store if it changed.
pub async fn run() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    let home = util::console_home(cli.home.as_deref()).context("Cannot find home directory")?;
    let log_dir = (!cli.no_log_file).then(|| home.join("logs"));
    commands::logs::init_logging(cli.verbose, log_dir.as_deref());

    let mut ctx = commands::Context::load(&home);
    let result = commands::dispatch(cli.command, &mut ctx).await;

    if ctx.dirty {
        ctx.save().context("Failed to save settings")?;
    }

    match result {
        Ok(output) => {
            output.print(cli.json);
            Ok(())
        }
        Err(e) => {
            if cli.json {
                println!("{}", json!({ "error": e }));
            }
            Err(e.into())
        }
    }
}
