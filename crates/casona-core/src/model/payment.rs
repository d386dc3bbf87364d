// ── Payment domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PaymentId, ResidentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ARS")]
    Ars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    /// Some historical rows carry `credit_card`; both spellings decode here.
    #[serde(alias = "credit_card")]
    Card,
    PettyCash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    MonthlyRent,
    Matricula,
    Deposit,
    Utilities,
    Other,
}

/// Payment lifecycle. Transitions are one-way:
/// `Pending -> Completed` or `Pending -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Cancelled,
}

/// A financial transaction owed by or received from a resident (or
/// the general-income sentinel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub resident_id: ResidentId,
    pub amount: f64,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: PaymentType,
    pub status: PaymentStatus,
    pub receipt_number: Option<String>,
    /// Set on the shortfall payment synthesized when a pending payment
    /// is completed for less than the owed amount.
    #[serde(default)]
    pub is_partial_payment: bool,
}

impl Payment {
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}
