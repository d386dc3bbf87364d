// ── State engine ──
//
// A single synchronous reducer owns every entity collection. Each
// dispatch validates, derives dependent state, and returns the next
// snapshot before any persistence work starts; the outbox produced
// alongside is handed to a spawned effect runner. Offline operation is
// the gateway's concern (the Null variant), never the reducer's.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use casona_store::Gateway;

use crate::action::{Action, LoadedData};
use crate::model::{
    Configuration, Currency, Expense, HistoryId, MaintenanceTask, MonthlyRateHistory, Payment,
    PaymentId, PaymentMethod, PaymentStatus, PaymentType, Reservation, Resident, ResidentId,
    ResidentStatus, Room, TaskStatus, HISTORY_CAP,
};
use crate::occupancy::derive_rooms;
use crate::outbox::{self, StoreEvent};

// ── AppState ─────────────────────────────────────────────────────────

/// The full application snapshot exposed to consumers.
///
/// Owned exclusively by the [`Engine`]; consumers read it and dispatch
/// actions, nothing else mutates it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub residents: Vec<Resident>,
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub payments: Vec<Payment>,
    pub expenses: Vec<Expense>,
    pub maintenance_tasks: Vec<MaintenanceTask>,
    pub configuration: Configuration,
    /// Runtime source of truth for the petty-cash balance; the copy on
    /// `configuration` is the persisted seed.
    pub petty_cash: f64,
    pub is_loading: bool,
    pub is_connected: bool,
    pub is_demo_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let configuration = Configuration::default();
        let petty_cash = configuration.petty_cash;
        Self {
            residents: Vec::new(),
            rooms: Vec::new(),
            reservations: Vec::new(),
            payments: Vec::new(),
            expenses: Vec::new(),
            maintenance_tasks: Vec::new(),
            configuration,
            petty_cash,
            is_loading: true,
            is_connected: false,
            is_demo_mode: true,
        }
    }
}

// ── Reducer ──────────────────────────────────────────────────────────

/// Remove a resident's pending payments, in place.
fn purge_pending_payments(payments: &mut Vec<Payment>, resident_id: &ResidentId) {
    payments.retain(|p| !(p.resident_id == *resident_id && p.is_pending()));
}

/// Apply one action: `(state, action) -> (state, outbox)`.
///
/// Pure and total -- no I/O, no failure path. Cases that do not apply
/// return the state unchanged with an empty outbox.
#[allow(clippy::too_many_lines)]
pub fn reduce(mut state: AppState, action: Action) -> (AppState, Vec<StoreEvent>) {
    let mut outbox = Vec::new();

    match action {
        // ── Residents ────────────────────────────────────────────────
        Action::AddResident(resident) => {
            if !resident.is_general_income() {
                outbox.push(StoreEvent::ResidentInserted(resident.clone()));
            }
            state.residents.push(resident);
            state.rooms = derive_rooms(&state.rooms, &state.residents);
        }

        Action::UpdateResident(resident) => {
            let old_status = state
                .residents
                .iter()
                .find(|r| r.id == resident.id)
                .map(|r| r.status);

            if !resident.is_general_income() {
                outbox.push(StoreEvent::ResidentUpdated(resident.clone()));
            }

            let deactivated = old_status == Some(ResidentStatus::Active)
                && resident.status == ResidentStatus::Inactive;
            let resident_id = resident.id.clone();

            for r in &mut state.residents {
                if r.id == resident_id {
                    *r = resident.clone();
                }
            }
            state.rooms = derive_rooms(&state.rooms, &state.residents);

            // Leaving the residence cancels what was still owed.
            if deactivated {
                purge_pending_payments(&mut state.payments, &resident_id);
                outbox.push(StoreEvent::PendingPaymentsPurged(resident_id));
            }
        }

        Action::DeleteResident(id) => {
            if !id.is_general_income() {
                outbox.push(StoreEvent::ResidentDeleted(id.clone()));
            }
            state.residents.retain(|r| r.id != id);
            state.rooms = derive_rooms(&state.rooms, &state.residents);
            state.payments.retain(|p| p.resident_id != id);
            state.reservations.retain(|r| r.resident_id != id);
        }

        // ── Rooms ────────────────────────────────────────────────────
        Action::AddRoom(room) => {
            outbox.push(StoreEvent::RoomInserted(room.clone()));
            state.rooms.push(room);
            state.rooms = derive_rooms(&state.rooms, &state.residents);
        }

        Action::UpdateRoom(room) => {
            outbox.push(StoreEvent::RoomUpdated(room.clone()));
            let id = room.id.clone();
            for r in &mut state.rooms {
                if r.id == id {
                    *r = room.clone();
                }
            }
            state.rooms = derive_rooms(&state.rooms, &state.residents);
        }

        Action::DeleteRoom(id) => {
            outbox.push(StoreEvent::RoomDeleted(id.clone()));

            // Cascade computed against the pre-delete roster.
            let affected: Vec<ResidentId> = state
                .residents
                .iter()
                .filter(|r| r.room_id.as_ref() == Some(&id))
                .map(|r| r.id.clone())
                .collect();

            for r in &mut state.residents {
                if r.room_id.as_ref() == Some(&id) {
                    r.room_id = None;
                    r.status = ResidentStatus::Inactive;
                }
            }
            state.reservations.retain(|r| r.room_id != id);
            state
                .payments
                .retain(|p| !(affected.contains(&p.resident_id) && p.is_pending()));
            state.rooms.retain(|r| r.id != id);
            state.rooms = derive_rooms(&state.rooms, &state.residents);
        }

        // ── Reservations ─────────────────────────────────────────────
        Action::AddReservation(reservation) => {
            outbox.push(StoreEvent::ReservationInserted(reservation.clone()));

            // Booking always opens the enrollment-fee payment.
            let matricula = Payment {
                id: PaymentId::generate("matricula"),
                resident_id: reservation.resident_id.clone(),
                amount: reservation.matricula_amount,
                currency: Currency::Ars,
                method: PaymentMethod::Cash,
                date: Utc::now(),
                kind: PaymentType::Matricula,
                status: PaymentStatus::Pending,
                receipt_number: None,
                is_partial_payment: false,
            };
            outbox.push(StoreEvent::PaymentInserted(matricula.clone()));

            state.reservations.push(reservation);
            state.payments.push(matricula);
        }

        Action::UpdateReservation(reservation) => {
            let id = reservation.id.clone();
            for r in &mut state.reservations {
                if r.id == id {
                    *r = reservation.clone();
                }
            }
        }

        Action::DeleteReservation(id) => {
            outbox.push(StoreEvent::ReservationDeleted(id.clone()));

            let reservation = state.reservations.iter().find(|r| r.id == id).cloned();
            state.reservations.retain(|r| r.id != id);

            // Cancelling before check-in unwinds the placeholder
            // resident and whatever it still owed. An active resident
            // is never reachable here: check-in already deleted the
            // reservation.
            if let Some(reservation) = reservation {
                let placeholder = state
                    .residents
                    .iter()
                    .any(|r| r.id == reservation.resident_id && r.status == ResidentStatus::Pending);
                if placeholder {
                    state.residents.retain(|r| r.id != reservation.resident_id);
                    state.rooms = derive_rooms(&state.rooms, &state.residents);
                    purge_pending_payments(&mut state.payments, &reservation.resident_id);

                    outbox.push(StoreEvent::ResidentDeleted(reservation.resident_id.clone()));
                    outbox.push(StoreEvent::PendingPaymentsPurged(reservation.resident_id));
                }
            }
        }

        // ── Payments ─────────────────────────────────────────────────
        Action::AddPayment(payment) => {
            outbox.push(StoreEvent::PaymentInserted(payment.clone()));
            state.payments.push(payment);
        }

        Action::UpdatePayment(payment) => {
            let original = state.payments.iter().find(|p| p.id == payment.id).cloned();
            outbox.push(StoreEvent::PaymentUpdated(payment.clone()));

            let id = payment.id.clone();
            for p in &mut state.payments {
                if p.id == id {
                    *p = payment.clone();
                }
            }

            // Partial collection: close the original at the collected
            // amount and open a pending payment for the shortfall.
            if payment.status == PaymentStatus::Completed {
                if let Some(original) = original {
                    if payment.amount < original.amount {
                        let remainder = Payment {
                            id: PaymentId::generate("partial"),
                            resident_id: payment.resident_id.clone(),
                            amount: original.amount - payment.amount,
                            currency: payment.currency,
                            method: payment.method,
                            date: Utc::now(),
                            kind: payment.kind,
                            status: PaymentStatus::Pending,
                            receipt_number: None,
                            is_partial_payment: true,
                        };
                        outbox.push(StoreEvent::PaymentInserted(remainder.clone()));
                        state.payments.push(remainder);
                    }
                }
            }
        }

        Action::DeletePayment(id) => {
            outbox.push(StoreEvent::PaymentDeleted(id.clone()));
            state.payments.retain(|p| p.id != id);
        }

        // ── Expenses ─────────────────────────────────────────────────
        Action::AddExpense(expense) => {
            outbox.push(StoreEvent::ExpenseInserted(expense.clone()));

            if expense.method == PaymentMethod::PettyCash {
                // Sign-overloaded: a negative amount is a top-up.
                state.petty_cash -= expense.amount;
                outbox.push(StoreEvent::PettyCashUpdated {
                    config_id: state.configuration.id.clone(),
                    balance: state.petty_cash,
                });
            }

            state.expenses.push(expense);
        }

        Action::UpdateExpense(expense) => {
            // Corrections do not re-balance petty cash; only creation
            // moves the balance.
            outbox.push(StoreEvent::ExpenseUpdated(expense.clone()));
            let id = expense.id.clone();
            for e in &mut state.expenses {
                if e.id == id {
                    *e = expense.clone();
                }
            }
        }

        // ── Maintenance ──────────────────────────────────────────────
        Action::AddMaintenanceTask(task) => {
            outbox.push(StoreEvent::TaskInserted(task.clone()));
            state.maintenance_tasks.push(task);
        }

        Action::UpdateMaintenanceTask(mut task) => {
            // completed_date tracks entry into Completed only.
            if task.status == TaskStatus::Completed {
                if task.completed_date.is_none() {
                    task.completed_date = Some(Utc::now());
                }
            } else {
                task.completed_date = None;
            }

            outbox.push(StoreEvent::TaskUpdated(task.clone()));
            let id = task.id.clone();
            for t in &mut state.maintenance_tasks {
                if t.id == id {
                    *t = task.clone();
                }
            }
        }

        Action::DeleteMaintenanceTask(id) => {
            outbox.push(StoreEvent::TaskDeleted(id.clone()));
            state.maintenance_tasks.retain(|t| t.id != id);
        }

        // ── Configuration & finances ─────────────────────────────────
        Action::UpdateConfiguration(configuration) => {
            outbox.push(StoreEvent::ConfigurationUpserted(configuration.clone()));
            state.configuration = configuration;
        }

        Action::UpdatePettyCash(balance) => {
            state.petty_cash = balance;
            outbox.push(StoreEvent::PettyCashUpdated {
                config_id: state.configuration.id.clone(),
                balance,
            });
        }

        Action::SaveMonthlyRates { month, saved_by } => {
            let now = Utc::now();
            let entry = MonthlyRateHistory {
                id: HistoryId::generate("history"),
                month: month.clone(),
                exchange_rate: state.configuration.exchange_rate,
                room_rates_usd: state.configuration.room_rates,
                room_rates_ars: state.configuration.room_rates_ars,
                created_date: now,
                created_by: saved_by,
            };
            outbox.push(StoreEvent::RateHistoryUpserted(entry.clone()));

            let history = &mut state.configuration.monthly_history;
            if let Some(existing) = history.iter_mut().find(|h| h.month == month) {
                // Upsert keeps the original entry id.
                let id = existing.id.clone();
                *existing = MonthlyRateHistory { id, ..entry };
            } else {
                history.push(entry);
            }
            history.sort_by(|a, b| b.month.cmp(&a.month));
            history.truncate(HISTORY_CAP);

            state.configuration.last_updated = now;
            outbox.push(StoreEvent::MonthlyHistoryWritten {
                config_id: state.configuration.id.clone(),
                last_updated: now,
                history: state.configuration.monthly_history.clone(),
            });
        }

        Action::GenerateMonthlyPayments => {
            let mut generated = Vec::new();

            for resident in &state.residents {
                if resident.status != ResidentStatus::Active {
                    continue;
                }
                let Some(room) = resident
                    .room_id
                    .as_ref()
                    .and_then(|id| state.rooms.iter().find(|r| r.id == *id))
                else {
                    continue;
                };

                let already_owing = state.payments.iter().any(|p| {
                    p.resident_id == resident.id
                        && p.kind == PaymentType::MonthlyRent
                        && p.is_pending()
                });
                if already_owing {
                    continue;
                }

                let payment = Payment {
                    id: PaymentId::generate("monthly"),
                    resident_id: resident.id.clone(),
                    amount: state.configuration.room_rates_ars.get(room.kind),
                    currency: Currency::Ars,
                    method: PaymentMethod::Cash,
                    date: Utc::now(),
                    kind: PaymentType::MonthlyRent,
                    status: PaymentStatus::Pending,
                    receipt_number: None,
                    is_partial_payment: false,
                };
                outbox.push(StoreEvent::PaymentInserted(payment.clone()));
                generated.push(payment);
            }

            state.payments.extend(generated);
        }

        // ── Lifecycle ────────────────────────────────────────────────
        Action::Load(data) => {
            let LoadedData {
                residents,
                rooms,
                reservations,
                payments,
                expenses,
                maintenance_tasks,
                configuration,
                petty_cash,
                is_loading,
                is_connected,
                is_demo_mode,
            } = *data;

            // Rooms are derived against the roster that arrived with
            // them, not whatever was in memory before the load.
            let loaded_residents = residents.clone().unwrap_or_default();
            if let Some(residents) = residents {
                state.residents = residents;
            }
            if let Some(rooms) = rooms {
                state.rooms = derive_rooms(&rooms, &loaded_residents);
            }
            if let Some(reservations) = reservations {
                state.reservations = reservations;
            }
            if let Some(payments) = payments {
                state.payments = payments;
            }
            if let Some(expenses) = expenses {
                state.expenses = expenses;
            }
            if let Some(tasks) = maintenance_tasks {
                state.maintenance_tasks = tasks;
            }
            if let Some(configuration) = configuration {
                state.configuration = configuration;
            }
            if let Some(petty_cash) = petty_cash {
                state.petty_cash = petty_cash;
            }
            if let Some(is_loading) = is_loading {
                state.is_loading = is_loading;
            }
            if let Some(is_connected) = is_connected {
                state.is_connected = is_connected;
            }
            if let Some(is_demo_mode) = is_demo_mode {
                state.is_demo_mode = is_demo_mode;
            }
        }

        Action::SetLoading(flag) => state.is_loading = flag,
        Action::SetConnected(flag) => state.is_connected = flag,
        Action::SetDemoMode(flag) => state.is_demo_mode = flag,
    }

    (state, outbox)
}

// ── Engine ───────────────────────────────────────────────────────────

/// The state engine: owns the snapshot and the persistence gateway.
///
/// `dispatch` is synchronous -- the next snapshot is visible before any
/// persistence call is even scheduled. Outbox events run fire-and-forget
/// on a spawned task, so a dispatch is never blocked by a previous
/// dispatch's pending writes. Must be driven inside a tokio runtime.
pub struct Engine {
    state: AppState,
    gateway: Arc<Gateway>,
}

impl Engine {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            state: AppState::default(),
            gateway,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Access the gateway (diagnostics: probe, stats).
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Apply an action and schedule its persistence effects.
    pub fn dispatch(&mut self, action: Action) {
        debug!(action = ?std::mem::discriminant(&action), "dispatch");
        let state = std::mem::take(&mut self.state);
        let (next, events) = reduce(state, action);
        self.state = next;

        if !events.is_empty() {
            tokio::spawn(outbox::run(Arc::clone(&self.gateway), events));
        }
    }

    /// Run the bootstrap sequence: decide the operating mode, load the
    /// initial dataset (remote or bundled), and apply it in a single
    /// consolidated action.
    pub async fn bootstrap(&mut self) {
        self.dispatch(Action::SetLoading(true));
        let data = crate::bootstrap::load_all(&self.gateway).await;
        self.dispatch(Action::Load(Box::new(data)));
    }
}
