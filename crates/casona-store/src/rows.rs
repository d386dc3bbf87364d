// ── Wire row types ──
//
// Flattened, snake_cased projections of the domain entities, one struct
// per remote table. These are transport shapes only: timestamps stay as
// ISO-8601 strings and nested objects are flattened (e.g. the emergency
// contact) or carried as raw JSON columns. `casona-core::convert` owns
// the mapping to and from domain types.

use serde::{Deserialize, Serialize};

/// `residents` table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidentRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub email: String,
    pub phone: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,
    pub room_id: Option<String>,
    pub check_in_date: String,
    pub check_out_date: Option<String>,
    pub status: String,
    /// JSON column; carries the note objects verbatim.
    #[serde(default)]
    pub behavior_notes: Option<serde_json::Value>,
    /// JSON column; carries the document objects verbatim.
    #[serde(default)]
    pub documents: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `rooms` table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRow {
    pub id: String,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: u32,
    pub current_occupancy: u32,
    pub status: String,
    pub monthly_rate_usd: f64,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `reservations` table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRow {
    pub id: String,
    pub resident_id: String,
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub matricula_amount: f64,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub discount_value: Option<f64>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

/// `payments` table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRow {
    pub id: String,
    pub resident_id: String,
    pub amount: f64,
    pub currency: String,
    pub method: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub is_partial_payment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `expenses` table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    pub method: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `maintenance_tasks` table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTaskRow {
    pub id: String,
    pub area: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub assigned_date: String,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Per-tier rate table as stored in the JSON rate columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateTable {
    pub individual: f64,
    pub double: f64,
    pub triple: f64,
    pub quadruple: f64,
    pub quintuple: f64,
}

/// `configurations` singleton row.
///
/// The `monthly_history` JSON column is written by the rate-history
/// save path but never read at load time -- history is loaded from the
/// `monthly_rate_history` table instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationRow {
    pub id: String,
    pub exchange_rate: f64,
    pub last_updated: String,
    pub room_rates_usd: RateTable,
    pub room_rates_ars: RateTable,
    pub payment_methods: Vec<String>,
    pub expense_categories: Vec<String>,
    pub maintenance_areas: Vec<String>,
    pub petty_cash: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `monthly_rate_history` table row, upserted by `month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRateHistoryRow {
    pub id: String,
    pub month: String,
    pub exchange_rate: f64,
    pub room_rates_usd: RateTable,
    pub room_rates_ars: RateTable,
    pub created_date: String,
    pub created_by: String,
}
