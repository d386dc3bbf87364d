// ── Action catalogue ──
//
// All state mutations flow through a single `Action` enum. The reducer
// is total over this catalogue: every variant maps to exactly one case,
// and a case that does not apply (e.g. updating a payment that does not
// exist) leaves the state unchanged rather than failing.

use crate::model::{
    Configuration, Expense, MaintenanceTask, Month, Payment, PaymentId, Reservation,
    ReservationId, Resident, ResidentId, Room, RoomId, TaskId,
};

/// A mutation request against the application state.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Residents ────────────────────────────────────────────────────
    AddResident(Resident),
    UpdateResident(Resident),
    DeleteResident(ResidentId),

    // ── Rooms ────────────────────────────────────────────────────────
    AddRoom(Room),
    UpdateRoom(Room),
    DeleteRoom(RoomId),

    // ── Reservations ─────────────────────────────────────────────────
    AddReservation(Reservation),
    UpdateReservation(Reservation),
    DeleteReservation(ReservationId),

    // ── Payments ─────────────────────────────────────────────────────
    AddPayment(Payment),
    UpdatePayment(Payment),
    DeletePayment(PaymentId),

    // ── Expenses ─────────────────────────────────────────────────────
    AddExpense(Expense),
    UpdateExpense(Expense),

    // ── Maintenance ──────────────────────────────────────────────────
    AddMaintenanceTask(MaintenanceTask),
    UpdateMaintenanceTask(MaintenanceTask),
    DeleteMaintenanceTask(TaskId),

    // ── Configuration & finances ─────────────────────────────────────
    UpdateConfiguration(Configuration),
    UpdatePettyCash(f64),
    /// Snapshot the current rate tables into the history log under the
    /// given month key.
    SaveMonthlyRates { month: Month, saved_by: String },
    /// Synthesize one pending monthly-rent payment for every active
    /// resident that does not already have one. Idempotent.
    GenerateMonthlyPayments,

    // ── Lifecycle ────────────────────────────────────────────────────
    /// Wholesale collection replacement; used only by the bootstrap
    /// sequencer.
    Load(Box<LoadedData>),
    SetLoading(bool),
    SetConnected(bool),
    SetDemoMode(bool),
}

/// Payload of [`Action::Load`]: every field is optional, and only the
/// collections present replace their counterparts in the state.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub residents: Option<Vec<Resident>>,
    pub rooms: Option<Vec<Room>>,
    pub reservations: Option<Vec<Reservation>>,
    pub payments: Option<Vec<Payment>>,
    pub expenses: Option<Vec<Expense>>,
    pub maintenance_tasks: Option<Vec<MaintenanceTask>>,
    pub configuration: Option<Configuration>,
    pub petty_cash: Option<f64>,
    pub is_loading: Option<bool>,
    pub is_connected: Option<bool>,
    pub is_demo_mode: Option<bool>,
}
