// ── Resident domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ResidentId, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidentStatus {
    Active,
    Inactive,
    /// Placeholder created by a reservation, not yet checked in.
    Pending,
}

/// Country of origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nationality {
    Argentina,
    Bolivia,
    Brasil,
    Chile,
    Colombia,
    Ecuador,
    Paraguay,
    Peru,
    Uruguay,
    Venezuela,
    /// Fallback for values outside the supported list.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Verbal,
    Written,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSeverity {
    Low,
    Medium,
    High,
}

/// One entry of a resident's append-only behavior log.
///
/// Serialized camelCase: these travel verbatim inside the resident
/// row's JSON column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorNote {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub description: String,
    pub severity: NoteSeverity,
    pub created_by: String,
}

/// One entry of a resident's append-only document log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub upload_date: DateTime<Utc>,
}

/// A person occupying, or slated to occupy, a room.
///
/// `room_id` is a soft reference: it should point at an existing room,
/// but a dangling id is tolerated (the occupancy derivation simply
/// finds no match). The `general-income` sentinel resident carries
/// non-resident cash flow and is exempt from remote persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resident {
    pub id: ResidentId,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Nationality,
    pub email: String,
    pub phone: String,
    pub emergency_contact: EmergencyContact,
    pub room_id: Option<RoomId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: Option<NaiveDate>,
    pub status: ResidentStatus,
    #[serde(default)]
    pub behavior_notes: Vec<BehaviorNote>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Resident {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_general_income(&self) -> bool {
        self.id.is_general_income()
    }
}
