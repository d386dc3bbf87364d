// ── Identifier newtypes ──
//
// One opaque identifier type per entity. References between entities
// (a resident's room, a reservation's resident) are soft: they carry
// an id, not a borrow, and a dangling id is tolerated where the
// reducer documents it. Keeping the types distinct stops a RoomId from
// ever being handed to a resident lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Mint a fresh identifier: `{prefix}-{uuid}`.
            pub fn generate(prefix: &str) -> Self {
                Self(format!("{prefix}-{}", Uuid::new_v4()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

id_type!(
    /// Room identifier.
    RoomId
);
id_type!(
    /// Resident identifier.
    ResidentId
);
id_type!(
    /// Reservation identifier.
    ReservationId
);
id_type!(
    /// Payment identifier.
    PaymentId
);
id_type!(
    /// Expense identifier.
    ExpenseId
);
id_type!(
    /// Maintenance task identifier.
    TaskId
);
id_type!(
    /// Configuration singleton identifier.
    ConfigId
);
id_type!(
    /// Rate-history entry identifier.
    HistoryId
);

impl ResidentId {
    /// The sentinel resident carrying non-resident cash flow.
    ///
    /// Never persisted remotely and never deleted.
    pub fn general_income() -> Self {
        Self("general-income".to_owned())
    }

    pub fn is_general_income(&self) -> bool {
        self.0 == "general-income"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_their_prefix() {
        let id = PaymentId::generate("matricula");
        assert!(id.as_str().starts_with("matricula-"));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(PaymentId::generate("monthly"), PaymentId::generate("monthly"));
    }

    #[test]
    fn sentinel_round_trips_through_str() {
        let id: ResidentId = "general-income".parse().unwrap();
        assert!(id.is_general_income());
        assert!(!ResidentId::new("r1").is_general_income());
    }
}
