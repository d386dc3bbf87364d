// ── Bootstrap sequencer ──
//
// Decides the operating mode once at startup and produces the single
// consolidated load payload. The policy is all-or-nothing: if any of
// the parallel table reads fails (or any row is malformed), the whole
// remote dataset is discarded and the bundled sample data is used in
// demo mode. Partial adoption is never attempted.

use tracing::{info, warn};

use casona_store::rows::{
    ConfigurationRow, ExpenseRow, MaintenanceTaskRow, MonthlyRateHistoryRow, PaymentRow,
    ReservationRow, ResidentRow, RoomRow,
};
use casona_store::{Gateway, StoreError};

use crate::action::LoadedData;
use crate::convert::configuration_from_rows;
use crate::error::CoreError;
use crate::model::{
    Configuration, Expense, MaintenanceTask, Payment, Reservation, Resident, Room,
};
use crate::sample;

/// Load the initial dataset.
///
/// Offline gateway: bundled sample data, demo mode. Live gateway: one
/// parallel read per table; all succeed and parse, or the sample data
/// is used instead.
pub async fn load_all(gateway: &Gateway) -> LoadedData {
    if !gateway.is_live() {
        info!("no store credentials configured; loading bundled sample data");
        return sample::demo_data();
    }

    let (residents, rooms, reservations, payments, expenses, tasks, configuration, history) = tokio::join!(
        gateway.select_residents(),
        gateway.select_rooms(),
        gateway.select_reservations(),
        gateway.select_payments(),
        gateway.select_expenses(),
        gateway.select_maintenance_tasks(),
        gateway.select_configuration(),
        gateway.select_rate_history(),
    );

    match assemble(
        residents,
        rooms,
        reservations,
        payments,
        expenses,
        tasks,
        configuration,
        history,
    ) {
        Ok(data) => {
            info!(
                residents = data.residents.as_ref().map_or(0, Vec::len),
                rooms = data.rooms.as_ref().map_or(0, Vec::len),
                "loaded remote dataset"
            );
            data
        }
        Err(e) => {
            warn!(error = %e, "remote load failed; falling back to bundled sample data");
            sample::demo_data()
        }
    }
}

type Read<T> = Result<Vec<T>, StoreError>;

#[allow(clippy::too_many_arguments)]
fn assemble(
    residents: Read<ResidentRow>,
    rooms: Read<RoomRow>,
    reservations: Read<ReservationRow>,
    payments: Read<PaymentRow>,
    expenses: Read<ExpenseRow>,
    tasks: Read<MaintenanceTaskRow>,
    configuration: Result<Option<ConfigurationRow>, StoreError>,
    history: Read<MonthlyRateHistoryRow>,
) -> Result<LoadedData, CoreError> {
    let residents: Vec<Resident> = parse(residents?)?;
    let rooms: Vec<Room> = parse(rooms?)?;
    let reservations: Vec<Reservation> = parse(reservations?)?;
    let payments: Vec<Payment> = parse(payments?)?;
    let expenses: Vec<Expense> = parse(expenses?)?;
    let tasks: Vec<MaintenanceTask> = parse(tasks?)?;

    // The history table only matters when a configuration row exists;
    // an unprovisioned singleton falls back to the built-in defaults.
    let configuration = match configuration? {
        Some(row) => configuration_from_rows(row, history?)?,
        None => Configuration::default(),
    };
    let petty_cash = configuration.petty_cash;

    Ok(LoadedData {
        residents: Some(residents),
        rooms: Some(rooms),
        reservations: Some(reservations),
        payments: Some(payments),
        expenses: Some(expenses),
        maintenance_tasks: Some(tasks),
        configuration: Some(configuration),
        petty_cash: Some(petty_cash),
        is_loading: Some(false),
        is_connected: Some(true),
        is_demo_mode: Some(false),
    })
}

fn parse<R, D: TryFrom<R, Error = CoreError>>(rows: Vec<R>) -> Result<Vec<D>, CoreError> {
    rows.into_iter().map(D::try_from).collect()
}
