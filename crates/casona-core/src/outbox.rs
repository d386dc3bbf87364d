// ── Persistence outbox ──
//
// The reducer is pure: instead of touching the network it returns a
// list of `StoreEvent`s describing what changed. The effect runner
// consumes that list on a spawned task, mapping each event to one
// gateway call. Failures are logged and never fed back -- the in-memory
// state is optimistic and the remote store is eventually consistent
// with it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::error;

use casona_store::Gateway;
use casona_store::rows::MonthlyRateHistoryRow;

use crate::convert::iso_now;
use crate::model::{
    ConfigId, Configuration, Expense, MaintenanceTask, MonthlyRateHistory, Payment, PaymentId,
    Reservation, ReservationId, Resident, ResidentId, Room, RoomId, TaskId,
};

/// One pending write against the remote store.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    ResidentInserted(Resident),
    ResidentUpdated(Resident),
    ResidentDeleted(ResidentId),
    /// Delete every pending payment owed by one resident.
    PendingPaymentsPurged(ResidentId),

    RoomInserted(Room),
    RoomUpdated(Room),
    RoomDeleted(RoomId),

    ReservationInserted(Reservation),
    ReservationDeleted(ReservationId),

    PaymentInserted(Payment),
    PaymentUpdated(Payment),
    PaymentDeleted(PaymentId),

    ExpenseInserted(Expense),
    ExpenseUpdated(Expense),

    TaskInserted(MaintenanceTask),
    TaskUpdated(MaintenanceTask),
    TaskDeleted(TaskId),

    ConfigurationUpserted(Configuration),
    PettyCashUpdated { config_id: ConfigId, balance: f64 },
    RateHistoryUpserted(MonthlyRateHistory),
    /// Mirror the in-memory history log onto the configuration row.
    MonthlyHistoryWritten {
        config_id: ConfigId,
        last_updated: DateTime<Utc>,
        history: Vec<MonthlyRateHistory>,
    },
}

/// Apply one dispatch's outbox to the gateway, in order.
///
/// Runs on its own task; the dispatching caller has already returned.
/// Each failure is logged with the entity it concerns and the remaining
/// events still run -- a lost write must not block later ones.
pub async fn run(gateway: Arc<Gateway>, events: Vec<StoreEvent>) {
    for event in events {
        if let Err(e) = apply(&gateway, event).await {
            error!(error = %e, "persistence write failed; in-memory state kept");
        }
    }
}

async fn apply(gateway: &Gateway, event: StoreEvent) -> Result<(), casona_store::StoreError> {
    match event {
        StoreEvent::ResidentInserted(r) => gateway.insert_resident(&(&r).into()).await,
        StoreEvent::ResidentUpdated(r) => {
            let mut row: casona_store::rows::ResidentRow = (&r).into();
            row.updated_at = Some(iso_now());
            gateway.update_resident(r.id.as_str(), &row).await
        }
        StoreEvent::ResidentDeleted(id) => gateway.delete_resident(id.as_str()).await,
        StoreEvent::PendingPaymentsPurged(id) => {
            gateway.delete_pending_payments(id.as_str()).await
        }

        StoreEvent::RoomInserted(r) => gateway.insert_room(&(&r).into()).await,
        StoreEvent::RoomUpdated(r) => {
            let mut row: casona_store::rows::RoomRow = (&r).into();
            row.updated_at = Some(iso_now());
            gateway.update_room(r.id.as_str(), &row).await
        }
        StoreEvent::RoomDeleted(id) => gateway.delete_room(id.as_str()).await,

        StoreEvent::ReservationInserted(r) => gateway.insert_reservation(&(&r).into()).await,
        StoreEvent::ReservationDeleted(id) => gateway.delete_reservation(id.as_str()).await,

        StoreEvent::PaymentInserted(p) => gateway.insert_payment(&(&p).into()).await,
        StoreEvent::PaymentUpdated(p) => {
            let mut row: casona_store::rows::PaymentRow = (&p).into();
            row.updated_at = Some(iso_now());
            gateway.update_payment(p.id.as_str(), &row).await
        }
        StoreEvent::PaymentDeleted(id) => gateway.delete_payment(id.as_str()).await,

        StoreEvent::ExpenseInserted(e) => gateway.insert_expense(&(&e).into()).await,
        StoreEvent::ExpenseUpdated(e) => {
            let mut row: casona_store::rows::ExpenseRow = (&e).into();
            row.updated_at = Some(iso_now());
            gateway.update_expense(e.id.as_str(), &row).await
        }

        StoreEvent::TaskInserted(t) => gateway.insert_maintenance_task(&(&t).into()).await,
        StoreEvent::TaskUpdated(t) => {
            let mut row: casona_store::rows::MaintenanceTaskRow = (&t).into();
            row.updated_at = Some(iso_now());
            gateway.update_maintenance_task(t.id.as_str(), &row).await
        }
        StoreEvent::TaskDeleted(id) => gateway.delete_maintenance_task(id.as_str()).await,

        StoreEvent::ConfigurationUpserted(c) => gateway.upsert_configuration(&(&c).into()).await,
        StoreEvent::PettyCashUpdated { config_id, balance } => {
            gateway
                .update_petty_cash(config_id.as_str(), balance, &iso_now())
                .await
        }
        StoreEvent::RateHistoryUpserted(h) => gateway.upsert_rate_history(&(&h).into()).await,
        StoreEvent::MonthlyHistoryWritten {
            config_id,
            last_updated,
            history,
        } => {
            let rows: Vec<MonthlyRateHistoryRow> = history.iter().map(Into::into).collect();
            let json = serde_json::to_value(rows).unwrap_or_default();
            gateway
                .update_monthly_history(
                    config_id.as_str(),
                    &last_updated.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    &json,
                )
                .await
        }
    }
}
