//! `casona stats`: count-only queries against the headline tables.

use tabled::{Table, Tabled, settings::Style};

use casona_store::{AccessRole, Gateway, PostgrestClient, StoreConfig};

use crate::error::CliError;

#[derive(Tabled)]
struct StatRow {
    table: &'static str,
    rows: u64,
}

pub async fn handle(gateway: &Gateway, config: Option<&StoreConfig>) -> Result<(), CliError> {
    if !gateway.is_live() {
        return Err(CliError::Unavailable {
            message: "no remote store configured".into(),
            help: "set CASONA_STORE_URL and CASONA_STORE_ANON_KEY, or pass --url/--anon-key"
                .into(),
        });
    }

    // Counts go through the privileged tier when it is configured;
    // row-level security can hide rows from the anonymous key.
    let stats = match config.filter(|c| c.service_role_key.is_some()) {
        Some(cfg) => {
            let admin = Gateway::Live(PostgrestClient::new(cfg, AccessRole::ServiceRole)?);
            admin.stats().await?
        }
        None => gateway.stats().await?,
    };

    let rows = vec![
        StatRow {
            table: "residents",
            rows: stats.residents,
        },
        StatRow {
            table: "rooms",
            rows: stats.rooms,
        },
        StatRow {
            table: "payments",
            rows: stats.payments,
        },
    ];

    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}
