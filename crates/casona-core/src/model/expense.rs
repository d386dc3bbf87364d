// ── Expense domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::payment::{Currency, PaymentMethod};

/// An operational outlay.
///
/// The amount is sign-overloaded: positive is an outflow, negative is
/// a petty-cash top-up. An expense paid with [`PaymentMethod::PettyCash`]
/// debits the petty-cash balance by its amount at creation time; a
/// negative amount therefore credits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
    pub date: DateTime<Utc>,
    pub method: PaymentMethod,
    pub receipt: Option<String>,
}
