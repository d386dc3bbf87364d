//! `casona summary`: bootstrap the engine and summarize the snapshot.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use casona_core::{Engine, PaymentStatus, PaymentType};
use casona_store::Gateway;

use crate::error::CliError;

#[derive(Tabled)]
struct RoomRow {
    number: String,
    #[tabled(rename = "type")]
    kind: String,
    occupancy: String,
    status: String,
    #[tabled(rename = "rate (USD)")]
    rate: f64,
}

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "payment type")]
    kind: String,
    count: usize,
    #[tabled(rename = "total (ARS)")]
    total: f64,
}

pub async fn handle(gateway: Gateway) -> Result<(), CliError> {
    let mut engine = Engine::new(Arc::new(gateway));
    engine.bootstrap().await;
    let state = engine.state();

    let mode = if state.is_demo_mode {
        "demo (bundled sample data)".yellow().to_string()
    } else {
        "production".cyan().to_string()
    };
    println!("mode: {mode}\n");

    let rooms: Vec<RoomRow> = state
        .rooms
        .iter()
        .map(|r| RoomRow {
            number: r.number.clone(),
            kind: format!("{:?}", r.kind).to_lowercase(),
            occupancy: format!("{}/{}", r.current_occupancy, r.capacity),
            status: format!("{:?}", r.status).to_lowercase(),
            rate: r.monthly_rate,
        })
        .collect();
    println!("{}\n", Table::new(rooms).with(Style::rounded()));

    let mut pending: Vec<PendingRow> = Vec::new();
    for kind in [
        PaymentType::MonthlyRent,
        PaymentType::Matricula,
        PaymentType::Deposit,
        PaymentType::Utilities,
        PaymentType::Other,
    ] {
        let matching: Vec<_> = state
            .payments
            .iter()
            .filter(|p| p.kind == kind && p.status == PaymentStatus::Pending)
            .collect();
        if !matching.is_empty() {
            pending.push(PendingRow {
                kind: format!("{kind:?}"),
                count: matching.len(),
                total: matching.iter().map(|p| p.amount).sum(),
            });
        }
    }
    if pending.is_empty() {
        println!("no pending payments");
    } else {
        println!("{}", Table::new(pending).with(Style::rounded()));
    }

    println!("\npetty cash: {} ARS", state.petty_cash);
    println!(
        "residents: {} ({} active)",
        state.residents.len(),
        state
            .residents
            .iter()
            .filter(|r| r.status == casona_core::ResidentStatus::Active)
            .count()
    );

    Ok(())
}
