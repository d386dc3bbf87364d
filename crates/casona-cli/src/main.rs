mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use casona_store::{Gateway, StoreConfig};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store_config = resolve_store_config(&cli.global)?;
    let gateway = match &store_config {
        Some(cfg) => Gateway::live(cfg)?,
        None => Gateway::null(),
    };

    tracing::debug!(command = ?cli.command, live = gateway.is_live(), "dispatching command");

    match cli.command {
        Command::Status => commands::status::handle(&gateway).await,
        Command::Stats => commands::stats::handle(&gateway, store_config.as_ref()).await,
        Command::Summary => commands::summary::handle(gateway).await,
    }
}

/// Merge config file + environment, then apply CLI flag overrides.
fn resolve_store_config(global: &GlobalOpts) -> Result<Option<StoreConfig>, CliError> {
    let mut cfg = casona_config::load_config_or_default();
    if let Some(ref url) = global.url {
        cfg.url = Some(url.clone());
    }
    if let Some(ref key) = global.anon_key {
        cfg.anon_key = Some(key.clone());
    }

    Ok(casona_config::resolve_store_config(&cfg)?)
}
