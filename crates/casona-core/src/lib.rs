// casona-core: Domain model and state engine between casona-store and consumers (CLI/web).

pub mod action;
pub mod bootstrap;
pub mod convert;
pub mod engine;
pub mod error;
pub mod model;
pub mod occupancy;
pub mod outbox;
pub mod sample;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, LoadedData};
pub use engine::{AppState, Engine, reduce};
pub use error::CoreError;
pub use occupancy::derive_rooms;
pub use outbox::StoreEvent;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Identity
    ConfigId, ExpenseId, HistoryId, PaymentId, ReservationId, ResidentId, RoomId, TaskId,
    // Rooms
    Gender, Room, RoomStatus, RoomType,
    // Residents
    BehaviorNote, Document, EmergencyContact, Nationality, NoteKind, NoteSeverity, Resident,
    ResidentStatus,
    // Reservations
    Discount, DiscountType, Reservation, ReservationStatus,
    // Payments
    Currency, Payment, PaymentMethod, PaymentStatus, PaymentType,
    // Expenses
    Expense,
    // Maintenance
    MaintenanceTask, TaskPriority, TaskStatus,
    // Configuration
    Configuration, Month, MonthlyRateHistory, RoomRates,
};
