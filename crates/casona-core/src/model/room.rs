// ── Room domain types ──

use serde::{Deserialize, Serialize};

use super::ids::RoomId;

/// Capacity tier of a room. Capacity is determined by the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Individual,
    Double,
    Triple,
    Quadruple,
    Quintuple,
}

impl RoomType {
    /// Number of beds for this tier.
    pub fn capacity(self) -> u32 {
        match self {
            Self::Individual => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
            Self::Quintuple => 5,
        }
    }

    pub fn all() -> [Self; 5] {
        [
            Self::Individual,
            Self::Double,
            Self::Triple,
            Self::Quadruple,
            Self::Quintuple,
        ]
    }
}

/// Stored room status.
///
/// There is deliberately no `Full` variant: fullness is recomputed
/// from `capacity - current_occupancy` by whoever needs it (see
/// [`Room::vacancies`]), and any occupancy above zero reads `Occupied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

/// Gender partition of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A physical room.
///
/// `current_occupancy` and `status` are derived fields -- they are
/// recomputed by the occupancy derivation after every roster or room
/// mutation and must never be authored directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Display label (e.g., "1A").
    pub number: String,
    #[serde(rename = "type")]
    pub kind: RoomType,
    pub capacity: u32,
    pub current_occupancy: u32,
    pub status: RoomStatus,
    /// Monthly rate in USD.
    pub monthly_rate: f64,
    pub gender: Gender,
}

impl Room {
    /// Beds still free. Fullness is always derived, never stored.
    pub fn vacancies(&self) -> u32 {
        self.capacity.saturating_sub(self.current_occupancy)
    }

    pub fn is_full(&self) -> bool {
        self.current_occupancy >= self.capacity
    }
}
