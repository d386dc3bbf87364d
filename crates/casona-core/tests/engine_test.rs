// Reducer behavior tests: occupancy invariants, cascades, payment
// lifecycle, petty cash, rate history, and outbox contents.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;

use casona_core::{
    Action, AppState, Currency, EmergencyContact, Engine, Expense, ExpenseId, Gender,
    MaintenanceTask, Month, Nationality, Payment, PaymentId, PaymentMethod, PaymentStatus,
    PaymentType, Reservation, ReservationId, ReservationStatus, Resident, ResidentId,
    ResidentStatus, Room, RoomId, RoomStatus, RoomType, StoreEvent, TaskId, TaskPriority,
    TaskStatus, reduce,
};
use casona_store::Gateway;

// ── Builders ────────────────────────────────────────────────────────

fn room(id: &str, kind: RoomType) -> Room {
    Room {
        id: RoomId::new(id),
        number: id.to_uppercase(),
        kind,
        capacity: kind.capacity(),
        current_occupancy: 0,
        status: RoomStatus::Available,
        monthly_rate: 190.0,
        gender: Gender::Male,
    }
}

fn resident(id: &str, room_id: Option<&str>, status: ResidentStatus) -> Resident {
    Resident {
        id: ResidentId::new(id),
        first_name: "Ana".into(),
        last_name: "Gómez".into(),
        nationality: Nationality::Argentina,
        email: format!("{id}@example.com"),
        phone: "+54 11 5555-0000".into(),
        emergency_contact: EmergencyContact {
            name: "Luis Gómez".into(),
            phone: "+54 11 5555-0001".into(),
            relationship: "padre".into(),
        },
        room_id: room_id.map(RoomId::new),
        check_in_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        check_out_date: None,
        status,
        behavior_notes: Vec::new(),
        documents: Vec::new(),
    }
}

fn payment(id: &str, resident: &str, amount: f64, kind: PaymentType, status: PaymentStatus) -> Payment {
    Payment {
        id: PaymentId::new(id),
        resident_id: ResidentId::new(resident),
        amount,
        currency: Currency::Ars,
        method: PaymentMethod::Cash,
        date: Utc::now(),
        kind,
        status,
        receipt_number: None,
        is_partial_payment: false,
    }
}

fn reservation(id: &str, resident: &str, room: &str, matricula: f64) -> Reservation {
    Reservation {
        id: ReservationId::new(id),
        resident_id: ResidentId::new(resident),
        room_id: RoomId::new(room),
        start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        status: ReservationStatus::Pending,
        matricula_amount: matricula,
        discount: None,
        cancellation_reason: None,
    }
}

fn occupancy_invariant_holds(state: &AppState) -> bool {
    state.rooms.iter().all(|room| {
        let expected = state
            .residents
            .iter()
            .filter(|r| r.status == ResidentStatus::Active && r.room_id.as_ref() == Some(&room.id))
            .count();
        usize::try_from(room.current_occupancy).unwrap() == expected
    })
}

// ── Occupancy derivation through dispatches ─────────────────────────

#[test]
fn occupancy_tracks_every_roster_mutation() {
    let mut state = AppState::default();

    let (s, _) = reduce(state, Action::AddRoom(room("r1", RoomType::Double)));
    state = s;
    let (s, _) = reduce(state, Action::AddResident(resident("a", Some("r1"), ResidentStatus::Active)));
    state = s;
    assert!(occupancy_invariant_holds(&state));
    assert_eq!(state.rooms[0].current_occupancy, 1);
    assert_eq!(state.rooms[0].status, RoomStatus::Occupied);

    let (s, _) = reduce(state, Action::AddResident(resident("b", Some("r1"), ResidentStatus::Active)));
    state = s;
    assert_eq!(state.rooms[0].current_occupancy, 2);
    assert!(occupancy_invariant_holds(&state));

    // Deactivation frees the bed.
    let (s, _) = reduce(
        state,
        Action::UpdateResident(resident("b", Some("r1"), ResidentStatus::Inactive)),
    );
    state = s;
    assert_eq!(state.rooms[0].current_occupancy, 1);
    assert!(occupancy_invariant_holds(&state));

    let (s, _) = reduce(state, Action::DeleteResident(ResidentId::new("a")));
    state = s;
    assert_eq!(state.rooms[0].current_occupancy, 0);
    assert_eq!(state.rooms[0].status, RoomStatus::Available);
    assert!(occupancy_invariant_holds(&state));
}

#[test]
fn deactivating_a_resident_purges_their_pending_payments() {
    let mut state = AppState::default();
    state.rooms = vec![room("r1", RoomType::Double)];
    state.residents = vec![resident("a", Some("r1"), ResidentStatus::Active)];
    state.payments = vec![
        payment("p1", "a", 100.0, PaymentType::MonthlyRent, PaymentStatus::Pending),
        payment("p2", "a", 50.0, PaymentType::Other, PaymentStatus::Completed),
    ];

    let (state, events) = reduce(
        state,
        Action::UpdateResident(resident("a", Some("r1"), ResidentStatus::Inactive)),
    );

    assert_eq!(state.payments.len(), 1);
    assert_eq!(state.payments[0].id, PaymentId::new("p2"));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, StoreEvent::PendingPaymentsPurged(id) if id.as_str() == "a"))
    );
}

// ── Room deletion cascade ───────────────────────────────────────────

#[test]
fn deleting_a_room_orphans_residents_and_purges_their_debt() {
    let mut state = AppState::default();
    state.rooms = vec![room("r1", RoomType::Double), room("r2", RoomType::Triple)];
    state.residents = vec![
        resident("a", Some("r1"), ResidentStatus::Active),
        resident("b", Some("r1"), ResidentStatus::Active),
        resident("c", Some("r2"), ResidentStatus::Active),
    ];
    state.rooms = casona_core::derive_rooms(&state.rooms, &state.residents);
    state.payments = vec![
        payment("p1", "a", 100.0, PaymentType::MonthlyRent, PaymentStatus::Pending),
        payment("p2", "b", 100.0, PaymentType::MonthlyRent, PaymentStatus::Completed),
        payment("p3", "c", 100.0, PaymentType::MonthlyRent, PaymentStatus::Pending),
    ];
    state.reservations = vec![reservation("res1", "x", "r1", 50_000.0)];

    let (state, _) = reduce(state, Action::DeleteRoom(RoomId::new("r1")));

    assert_eq!(state.rooms.len(), 1);
    for id in ["a", "b"] {
        let r = state.residents.iter().find(|r| r.id.as_str() == id).unwrap();
        assert!(r.room_id.is_none());
        assert_eq!(r.status, ResidentStatus::Inactive);
        assert!(!state.payments.iter().any(|p| p.resident_id.as_str() == id
            && p.status == PaymentStatus::Pending));
    }
    // Completed history survives; the untouched room keeps its debt.
    assert!(state.payments.iter().any(|p| p.id.as_str() == "p2"));
    assert!(state.payments.iter().any(|p| p.id.as_str() == "p3"));
    // Reservations on the deleted room disappear.
    assert!(state.reservations.is_empty());
    assert!(occupancy_invariant_holds(&state));
}

// ── Reservations ────────────────────────────────────────────────────

#[test]
fn creating_a_reservation_synthesizes_one_pending_matricula_payment() {
    let state = AppState::default();
    let (state, events) = reduce(
        state,
        Action::AddReservation(reservation("res1", "pending-guy", "r1", 50_000.0)),
    );

    let matriculas: Vec<_> = state
        .payments
        .iter()
        .filter(|p| p.kind == PaymentType::Matricula)
        .collect();
    assert_eq!(matriculas.len(), 1);
    assert_eq!(matriculas[0].amount, 50_000.0);
    assert_eq!(matriculas[0].status, PaymentStatus::Pending);
    assert_eq!(matriculas[0].currency, Currency::Ars);
    assert_eq!(matriculas[0].resident_id.as_str(), "pending-guy");

    assert!(events.iter().any(|e| matches!(e, StoreEvent::ReservationInserted(_))));
    assert!(events.iter().any(|e| matches!(e, StoreEvent::PaymentInserted(_))));
}

#[test]
fn cancelling_a_pending_reservation_unwinds_the_placeholder() {
    let mut state = AppState::default();
    state.rooms = vec![room("r1", RoomType::Double)];
    state.residents = vec![resident("ghost", Some("r1"), ResidentStatus::Pending)];
    state.reservations = vec![reservation("res1", "ghost", "r1", 50_000.0)];
    state.payments = vec![payment(
        "m1",
        "ghost",
        50_000.0,
        PaymentType::Matricula,
        PaymentStatus::Pending,
    )];

    let (state, events) = reduce(state, Action::DeleteReservation(ReservationId::new("res1")));

    assert!(state.reservations.is_empty());
    assert!(state.residents.is_empty());
    assert!(state.payments.is_empty());
    assert!(events.iter().any(|e| matches!(e, StoreEvent::ResidentDeleted(_))));
    assert!(events.iter().any(|e| matches!(e, StoreEvent::PendingPaymentsPurged(_))));
}

#[test]
fn cancelling_a_reservation_for_an_active_resident_leaves_the_resident() {
    // After check-in the resident is active and the reservation is
    // normally already gone; if a stale one is deleted anyway, the
    // resident must survive.
    let mut state = AppState::default();
    state.rooms = vec![room("r1", RoomType::Double)];
    state.residents = vec![resident("a", Some("r1"), ResidentStatus::Active)];
    state.reservations = vec![reservation("res1", "a", "r1", 50_000.0)];
    state.payments = vec![payment(
        "p1",
        "a",
        100.0,
        PaymentType::MonthlyRent,
        PaymentStatus::Pending,
    )];

    let (state, events) = reduce(state, Action::DeleteReservation(ReservationId::new("res1")));

    assert!(state.reservations.is_empty());
    assert_eq!(state.residents.len(), 1);
    assert_eq!(state.payments.len(), 1);
    assert!(!events.iter().any(|e| matches!(e, StoreEvent::ResidentDeleted(_))));
}

#[test]
fn check_in_flow_converts_the_placeholder_and_drops_the_reservation() {
    // The presentation drives check-in as three dispatches: activate
    // the placeholder, add the first rent payment, delete the
    // reservation. Afterwards the cancel cascade is unreachable.
    let mut state = AppState::default();
    state.rooms = vec![room("r1", RoomType::Double)];
    state.residents = vec![resident("ghost", Some("r1"), ResidentStatus::Pending)];
    state.reservations = vec![reservation("res1", "ghost", "r1", 50_000.0)];

    let (s, _) = reduce(
        state,
        Action::UpdateResident(resident("ghost", Some("r1"), ResidentStatus::Active)),
    );
    let (s, _) = reduce(
        s,
        Action::AddPayment(payment(
            "rent1",
            "ghost",
            247_000.0,
            PaymentType::MonthlyRent,
            PaymentStatus::Pending,
        )),
    );
    let (s, _) = reduce(s, Action::DeleteReservation(ReservationId::new("res1")));

    assert!(s.reservations.is_empty());
    let ghost = s.residents.iter().find(|r| r.id.as_str() == "ghost").unwrap();
    assert_eq!(ghost.status, ResidentStatus::Active);
    assert_eq!(s.rooms[0].current_occupancy, 1);
    assert_eq!(s.payments.len(), 1);
}

// ── Payment lifecycle ───────────────────────────────────────────────

#[test]
fn partial_completion_splits_the_payment() {
    let mut state = AppState::default();
    state.payments = vec![payment(
        "p1",
        "a",
        100_000.0,
        PaymentType::MonthlyRent,
        PaymentStatus::Pending,
    )];

    let mut collected = state.payments[0].clone();
    collected.amount = 60_000.0;
    collected.status = PaymentStatus::Completed;

    let (state, events) = reduce(state, Action::UpdatePayment(collected));

    assert_eq!(state.payments.len(), 2);
    let original = state.payments.iter().find(|p| p.id.as_str() == "p1").unwrap();
    assert_eq!(original.status, PaymentStatus::Completed);
    assert_eq!(original.amount, 60_000.0);

    let remainder = state.payments.iter().find(|p| p.is_partial_payment).unwrap();
    assert_eq!(remainder.amount, 40_000.0);
    assert_eq!(remainder.status, PaymentStatus::Pending);
    assert_eq!(remainder.kind, PaymentType::MonthlyRent);
    assert_eq!(remainder.resident_id.as_str(), "a");

    assert!(events.iter().any(|e| matches!(e, StoreEvent::PaymentUpdated(_))));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, StoreEvent::PaymentInserted(p) if p.is_partial_payment))
    );
}

#[test]
fn full_completion_does_not_split() {
    let mut state = AppState::default();
    state.payments = vec![payment(
        "p1",
        "a",
        100_000.0,
        PaymentType::MonthlyRent,
        PaymentStatus::Pending,
    )];

    let mut collected = state.payments[0].clone();
    collected.status = PaymentStatus::Completed;

    let (state, _) = reduce(state, Action::UpdatePayment(collected));
    assert_eq!(state.payments.len(), 1);
    assert_eq!(state.payments[0].status, PaymentStatus::Completed);
}

// ── Monthly payment generation ──────────────────────────────────────

#[test]
fn generate_monthly_payments_is_idempotent() {
    let mut state = AppState::default();
    state.rooms = vec![room("r1", RoomType::Individual), room("r2", RoomType::Double)];
    state.residents = vec![
        resident("a", Some("r1"), ResidentStatus::Active),
        resident("b", Some("r2"), ResidentStatus::Active),
        resident("c", Some("r2"), ResidentStatus::Inactive),
        resident("d", None, ResidentStatus::Active),
    ];

    let (state, events) = reduce(state, Action::GenerateMonthlyPayments);

    // Two active residents with rooms; the inactive and the room-less
    // ones are skipped.
    let pending_rent = |s: &AppState| {
        s.payments
            .iter()
            .filter(|p| p.kind == PaymentType::MonthlyRent && p.status == PaymentStatus::Pending)
            .count()
    };
    assert_eq!(pending_rent(&state), 2);
    assert_eq!(events.len(), 2);

    let a_rent = state
        .payments
        .iter()
        .find(|p| p.resident_id.as_str() == "a")
        .unwrap();
    assert_eq!(a_rent.amount, state.configuration.room_rates_ars.individual);
    assert_eq!(a_rent.currency, Currency::Ars);

    // Second run generates nothing new.
    let (state, events) = reduce(state, Action::GenerateMonthlyPayments);
    assert_eq!(pending_rent(&state), 2);
    assert!(events.is_empty());
}

// ── Petty cash ──────────────────────────────────────────────────────

fn expense(id: &str, amount: f64, method: PaymentMethod) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        category: "Compras Limpieza".into(),
        description: "insumos".into(),
        amount,
        currency: Currency::Ars,
        date: Utc::now(),
        method,
        receipt: None,
    }
}

#[test]
fn petty_cash_expense_debits_the_balance() {
    let state = AppState::default();
    let before = state.petty_cash;

    let (state, events) = reduce(
        state,
        Action::AddExpense(expense("e1", 5_000.0, PaymentMethod::PettyCash)),
    );
    assert_eq!(state.petty_cash, before - 5_000.0);
    assert!(events.iter().any(
        |e| matches!(e, StoreEvent::PettyCashUpdated { balance, .. } if *balance == before - 5_000.0)
    ));

    // A negative amount is a top-up.
    let (state, _) = reduce(
        state,
        Action::AddExpense(expense("e2", -5_000.0, PaymentMethod::PettyCash)),
    );
    assert_eq!(state.petty_cash, before);
}

#[test]
fn non_petty_cash_expense_leaves_the_balance_alone() {
    let state = AppState::default();
    let before = state.petty_cash;

    let (state, events) = reduce(
        state,
        Action::AddExpense(expense("e1", 5_000.0, PaymentMethod::Transfer)),
    );
    assert_eq!(state.petty_cash, before);
    assert!(!events.iter().any(|e| matches!(e, StoreEvent::PettyCashUpdated { .. })));
}

#[test]
fn expense_correction_does_not_rebalance_petty_cash() {
    let state = AppState::default();
    let (state, _) = reduce(
        state,
        Action::AddExpense(expense("e1", 5_000.0, PaymentMethod::PettyCash)),
    );
    let after_add = state.petty_cash;

    let (state, _) = reduce(
        state,
        Action::UpdateExpense(expense("e1", 9_000.0, PaymentMethod::PettyCash)),
    );
    assert_eq!(state.petty_cash, after_add);
    assert_eq!(state.expenses[0].amount, 9_000.0);
}

// ── Maintenance ─────────────────────────────────────────────────────

fn task(id: &str, status: TaskStatus) -> MaintenanceTask {
    MaintenanceTask {
        id: TaskId::new(id),
        area: "Baño 2".into(),
        description: "pérdida".into(),
        priority: TaskPriority::High,
        status,
        assigned_date: Utc::now(),
        completed_date: None,
        photos: Vec::new(),
        notes: None,
    }
}

#[test]
fn completed_date_stamps_and_clears_with_status() {
    let mut state = AppState::default();
    state.maintenance_tasks = vec![task("t1", TaskStatus::Pending)];

    let (state, _) = reduce(state, Action::UpdateMaintenanceTask(task("t1", TaskStatus::Completed)));
    assert!(state.maintenance_tasks[0].completed_date.is_some());

    let (state, _) = reduce(
        state,
        Action::UpdateMaintenanceTask(task("t1", TaskStatus::InProgress)),
    );
    assert!(state.maintenance_tasks[0].completed_date.is_none());
}

// ── Rate history ────────────────────────────────────────────────────

#[test]
fn save_monthly_rates_upserts_by_month_and_caps_the_log() {
    let mut state = AppState::default();

    for i in 0u32..30 {
        let month = Month::new(2023 + i32::try_from(i / 12).unwrap(), (i % 12) + 1).unwrap();
        let (s, _) = reduce(
            state,
            Action::SaveMonthlyRates {
                month,
                saved_by: "admin".into(),
            },
        );
        state = s;
    }

    let history = &state.configuration.monthly_history;
    assert_eq!(history.len(), 24);
    // Most-recent first.
    assert!(history.windows(2).all(|w| w[0].month > w[1].month));
    assert_eq!(history[0].month.as_str(), "2025-06");

    // Re-saving an existing month keeps its entry id.
    let existing_id = history[0].id.clone();
    let (state, events) = reduce(
        state,
        Action::SaveMonthlyRates {
            month: "2025-06".parse().unwrap(),
            saved_by: "admin".into(),
        },
    );
    assert_eq!(state.configuration.monthly_history.len(), 24);
    assert_eq!(state.configuration.monthly_history[0].id, existing_id);
    assert!(events.iter().any(|e| matches!(e, StoreEvent::RateHistoryUpserted(_))));
    assert!(events.iter().any(|e| matches!(e, StoreEvent::MonthlyHistoryWritten { .. })));
}

// ── Outbox policy ───────────────────────────────────────────────────

#[test]
fn the_sentinel_resident_is_never_persisted() {
    let state = AppState::default();
    let sentinel = resident("general-income", None, ResidentStatus::Active);
    assert!(sentinel.is_general_income());

    let (state, events) = reduce(state, Action::AddResident(sentinel.clone()));
    assert!(events.is_empty());

    let (state, events) = reduce(state, Action::UpdateResident(sentinel));
    assert!(events.is_empty());

    let (state, events) = reduce(state, Action::DeleteResident(ResidentId::general_income()));
    assert!(events.is_empty());
    assert!(state.residents.is_empty());
}

#[test]
fn reservation_updates_stay_local() {
    let mut state = AppState::default();
    state.reservations = vec![reservation("res1", "a", "r1", 50_000.0)];

    let mut updated = state.reservations[0].clone();
    updated.status = ReservationStatus::Confirmed;

    let (state, events) = reduce(state, Action::UpdateReservation(updated));
    assert_eq!(state.reservations[0].status, ReservationStatus::Confirmed);
    assert!(events.is_empty());
}

#[test]
fn unmatched_updates_leave_state_unchanged_but_never_panic() {
    let state = AppState::default();
    let (state, _) = reduce(
        state,
        Action::UpdatePayment(payment("nope", "a", 1.0, PaymentType::Other, PaymentStatus::Completed)),
    );
    assert!(state.payments.is_empty());

    let (state, _) = reduce(state, Action::DeleteMaintenanceTask(TaskId::new("nope")));
    assert!(state.maintenance_tasks.is_empty());
}

// ── Engine dispatch ─────────────────────────────────────────────────

#[tokio::test]
async fn dispatch_returns_the_new_snapshot_synchronously() {
    let mut engine = Engine::new(Arc::new(Gateway::null()));

    engine.dispatch(Action::AddRoom(room("r1", RoomType::Double)));
    engine.dispatch(Action::AddResident(resident("a", Some("r1"), ResidentStatus::Active)));

    // Visible immediately, before any background effect settles.
    assert_eq!(engine.state().rooms[0].current_occupancy, 1);
    assert_eq!(engine.state().residents.len(), 1);
}
