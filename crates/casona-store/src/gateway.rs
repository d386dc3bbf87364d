// ── Persistence gateway ──
//
// Capability object over the remote store, selected once at
// construction: `Live` talks PostgREST, `Null` accepts every call and
// performs no I/O. Callers never branch on mode -- offline operation
// falls out of the variant, not of scattered conditionals.

use serde_json::json;

use crate::client::{AccessRole, PostgrestClient};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::rows::{
    ConfigurationRow, ExpenseRow, MaintenanceTaskRow, MonthlyRateHistoryRow, PaymentRow,
    ReservationRow, ResidentRow, RoomRow,
};

const RESIDENTS: &str = "residents";
const ROOMS: &str = "rooms";
const RESERVATIONS: &str = "reservations";
const PAYMENTS: &str = "payments";
const EXPENSES: &str = "expenses";
const MAINTENANCE_TASKS: &str = "maintenance_tasks";
const CONFIGURATIONS: &str = "configurations";
const RATE_HISTORY: &str = "monthly_rate_history";

/// Operating mode as reported to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Demo,
    Production,
}

/// Result of a connection probe.
#[derive(Debug, Clone)]
pub struct ConnectionReport {
    pub connected: bool,
    pub mode: StoreMode,
    pub error: Option<String>,
    pub detail: String,
}

/// Row counts for the headline tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub residents: u64,
    pub rooms: u64,
    pub payments: u64,
}

/// The persistence gateway.
pub enum Gateway {
    /// Network-backed PostgREST store.
    Live(PostgrestClient),
    /// Offline stand-in: accepts all calls, performs no I/O.
    Null,
}

impl Gateway {
    /// Build a live gateway on the anonymous-access tier.
    pub fn live(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self::Live(PostgrestClient::new(config, AccessRole::Anon)?))
    }

    /// The offline gateway.
    pub fn null() -> Self {
        Self::Null
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub async fn select_residents(&self) -> Result<Vec<ResidentRow>, StoreError> {
        match self {
            Self::Live(c) => c.select(RESIDENTS, &[]).await,
            Self::Null => Ok(Vec::new()),
        }
    }

    pub async fn select_rooms(&self) -> Result<Vec<RoomRow>, StoreError> {
        match self {
            Self::Live(c) => c.select(ROOMS, &[]).await,
            Self::Null => Ok(Vec::new()),
        }
    }

    pub async fn select_reservations(&self) -> Result<Vec<ReservationRow>, StoreError> {
        match self {
            Self::Live(c) => c.select(RESERVATIONS, &[]).await,
            Self::Null => Ok(Vec::new()),
        }
    }

    pub async fn select_payments(&self) -> Result<Vec<PaymentRow>, StoreError> {
        match self {
            Self::Live(c) => c.select(PAYMENTS, &[]).await,
            Self::Null => Ok(Vec::new()),
        }
    }

    pub async fn select_expenses(&self) -> Result<Vec<ExpenseRow>, StoreError> {
        match self {
            Self::Live(c) => c.select(EXPENSES, &[]).await,
            Self::Null => Ok(Vec::new()),
        }
    }

    pub async fn select_maintenance_tasks(&self) -> Result<Vec<MaintenanceTaskRow>, StoreError> {
        match self {
            Self::Live(c) => c.select(MAINTENANCE_TASKS, &[]).await,
            Self::Null => Ok(Vec::new()),
        }
    }

    /// The configuration singleton: first row, if any.
    pub async fn select_configuration(&self) -> Result<Option<ConfigurationRow>, StoreError> {
        match self {
            Self::Live(c) => {
                let mut rows: Vec<ConfigurationRow> =
                    c.select(CONFIGURATIONS, &[("limit", "1")]).await?;
                Ok(if rows.is_empty() {
                    None
                } else {
                    Some(rows.swap_remove(0))
                })
            }
            Self::Null => Ok(None),
        }
    }

    pub async fn select_rate_history(&self) -> Result<Vec<MonthlyRateHistoryRow>, StoreError> {
        match self {
            Self::Live(c) => c.select(RATE_HISTORY, &[]).await,
            Self::Null => Ok(Vec::new()),
        }
    }

    // ── Residents ────────────────────────────────────────────────────

    pub async fn insert_resident(&self, row: &ResidentRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.insert(RESIDENTS, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn update_resident(&self, id: &str, row: &ResidentRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.update(RESIDENTS, id, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn delete_resident(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.delete(RESIDENTS, &[("id", id)]).await,
            Self::Null => Ok(()),
        }
    }

    // ── Rooms ────────────────────────────────────────────────────────

    pub async fn insert_room(&self, row: &RoomRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.insert(ROOMS, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn update_room(&self, id: &str, row: &RoomRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.update(ROOMS, id, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn delete_room(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.delete(ROOMS, &[("id", id)]).await,
            Self::Null => Ok(()),
        }
    }

    // ── Reservations ─────────────────────────────────────────────────

    pub async fn insert_reservation(&self, row: &ReservationRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.insert(RESERVATIONS, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn delete_reservation(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.delete(RESERVATIONS, &[("id", id)]).await,
            Self::Null => Ok(()),
        }
    }

    // ── Payments ─────────────────────────────────────────────────────

    pub async fn insert_payment(&self, row: &PaymentRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.insert(PAYMENTS, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn update_payment(&self, id: &str, row: &PaymentRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.update(PAYMENTS, id, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn delete_payment(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.delete(PAYMENTS, &[("id", id)]).await,
            Self::Null => Ok(()),
        }
    }

    /// Delete every pending payment owed by one resident.
    pub async fn delete_pending_payments(&self, resident_id: &str) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => {
                c.delete(
                    PAYMENTS,
                    &[("resident_id", resident_id), ("status", "pending")],
                )
                .await
            }
            Self::Null => Ok(()),
        }
    }

    // ── Expenses ─────────────────────────────────────────────────────

    pub async fn insert_expense(&self, row: &ExpenseRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.insert(EXPENSES, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn update_expense(&self, id: &str, row: &ExpenseRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.update(EXPENSES, id, row).await,
            Self::Null => Ok(()),
        }
    }

    // ── Maintenance tasks ────────────────────────────────────────────

    pub async fn insert_maintenance_task(
        &self,
        row: &MaintenanceTaskRow,
    ) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.insert(MAINTENANCE_TASKS, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn update_maintenance_task(
        &self,
        id: &str,
        row: &MaintenanceTaskRow,
    ) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.update(MAINTENANCE_TASKS, id, row).await,
            Self::Null => Ok(()),
        }
    }

    pub async fn delete_maintenance_task(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.delete(MAINTENANCE_TASKS, &[("id", id)]).await,
            Self::Null => Ok(()),
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    pub async fn upsert_configuration(&self, row: &ConfigurationRow) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.upsert(CONFIGURATIONS, row, None).await,
            Self::Null => Ok(()),
        }
    }

    /// Write the petty-cash balance onto the configuration row.
    pub async fn update_petty_cash(
        &self,
        config_id: &str,
        balance: f64,
        updated_at: &str,
    ) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => {
                let patch = json!({ "petty_cash": balance, "updated_at": updated_at });
                c.update(CONFIGURATIONS, config_id, &patch).await
            }
            Self::Null => Ok(()),
        }
    }

    /// Write the serialized history log onto the configuration row.
    pub async fn update_monthly_history(
        &self,
        config_id: &str,
        last_updated: &str,
        history: &serde_json::Value,
    ) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => {
                let patch = json!({ "last_updated": last_updated, "monthly_history": history });
                c.update(CONFIGURATIONS, config_id, &patch).await
            }
            Self::Null => Ok(()),
        }
    }

    /// Upsert a rate-history entry, keyed by its `month` column.
    pub async fn upsert_rate_history(
        &self,
        row: &MonthlyRateHistoryRow,
    ) -> Result<(), StoreError> {
        match self {
            Self::Live(c) => c.upsert(RATE_HISTORY, row, Some("month")).await,
            Self::Null => Ok(()),
        }
    }

    // ── Diagnostics ──────────────────────────────────────────────────

    /// Probe the store with a one-row configuration select.
    ///
    /// Distinguishes "credentials fine, schema missing" from credential
    /// and transport failures. Never errors -- the report carries the
    /// outcome.
    pub async fn probe(&self) -> ConnectionReport {
        match self {
            Self::Null => ConnectionReport {
                connected: false,
                mode: StoreMode::Demo,
                error: None,
                detail: "running in demo mode with bundled sample data".into(),
            },
            Self::Live(c) => {
                match c
                    .select::<serde_json::Value>(CONFIGURATIONS, &[("limit", "1")])
                    .await
                {
                    Ok(_) => ConnectionReport {
                        connected: true,
                        mode: StoreMode::Production,
                        error: None,
                        detail: "connected to remote store".into(),
                    },
                    Err(e) if e.is_missing_schema() => ConnectionReport {
                        connected: false,
                        mode: StoreMode::Production,
                        error: Some("tables not found".into()),
                        detail: "credentials are valid but the schema has not been provisioned; \
                                 run the table-creation script against the store"
                            .into(),
                    },
                    Err(e) => ConnectionReport {
                        connected: false,
                        mode: StoreMode::Production,
                        error: Some(e.to_string()),
                        detail: "failed to reach the remote store; check credentials".into(),
                    },
                }
            }
        }
    }

    /// Count-only statistics for the headline tables.
    pub async fn stats(&self) -> Result<TableStats, StoreError> {
        match self {
            Self::Null => Ok(TableStats::default()),
            Self::Live(c) => {
                let (residents, rooms, payments) =
                    tokio::try_join!(c.count(RESIDENTS), c.count(ROOMS), c.count(PAYMENTS))?;
                Ok(TableStats {
                    residents,
                    rooms,
                    payments,
                })
            }
        }
    }
}
