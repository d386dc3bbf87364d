// ── Unified domain model ──
//
// Every type in this module is the canonical representation of a
// residence entity. The persistence gateway speaks flattened wire rows
// (`casona_store::rows`); the `convert` module bridges the two.

pub mod configuration;
pub mod expense;
pub mod ids;
pub mod maintenance;
pub mod payment;
pub mod reservation;
pub mod resident;
pub mod room;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use casona_core::model::*` gives you everything.

// Identity
pub use ids::{
    ConfigId, ExpenseId, HistoryId, PaymentId, ReservationId, ResidentId, RoomId, TaskId,
};

// Rooms
pub use room::{Gender, Room, RoomStatus, RoomType};

// Residents
pub use resident::{
    BehaviorNote, Document, EmergencyContact, Nationality, NoteKind, NoteSeverity, Resident,
    ResidentStatus,
};

// Reservations
pub use reservation::{Discount, DiscountType, Reservation, ReservationStatus};

// Payments
pub use payment::{Currency, Payment, PaymentMethod, PaymentStatus, PaymentType};

// Expenses
pub use expense::Expense;

// Maintenance
pub use maintenance::{MaintenanceTask, TaskPriority, TaskStatus};

// Configuration
pub use configuration::{Configuration, HISTORY_CAP, Month, MonthlyRateHistory, RoomRates};
