//! `casona status`: probe the store and report the operating mode.

use owo_colors::OwoColorize;

use casona_store::{Gateway, StoreMode};

use crate::error::CliError;

pub async fn handle(gateway: &Gateway) -> Result<(), CliError> {
    let report = gateway.probe().await;

    let mode = match report.mode {
        StoreMode::Demo => "demo".yellow().to_string(),
        StoreMode::Production => "production".cyan().to_string(),
    };
    let connection = if report.connected {
        "connected".green().to_string()
    } else {
        "disconnected".red().to_string()
    };

    println!("mode:       {mode}");
    println!("connection: {connection}");
    println!("detail:     {}", report.detail);
    if let Some(error) = report.error {
        println!("error:      {}", error.red());
    }

    Ok(())
}
