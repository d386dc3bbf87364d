// ── Reservation domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ReservationId, ResidentId, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub value: f64,
}

/// A forward booking.
///
/// Creating one synthesizes a placeholder `Pending` resident and a
/// pending matricula payment; check-in replaces all three with an
/// active resident plus a monthly-rent payment and deletes the
/// reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub resident_id: ResidentId,
    pub room_id: RoomId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    /// Enrollment fee, in ARS, rounded to a whole unit by the caller.
    pub matricula_amount: f64,
    pub discount: Option<Discount>,
    pub cancellation_reason: Option<String>,
}
