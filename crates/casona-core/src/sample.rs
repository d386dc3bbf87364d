// ── Bundled sample data ──
//
// The demo dataset used whenever no remote store is reachable. Small
// but exercises every collection: occupied and empty rooms, an open
// reservation with its placeholder resident, pending and completed
// payments, a petty-cash expense, and open maintenance work.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::action::LoadedData;
use crate::model::{
    Configuration, Currency, Discount, DiscountType, EmergencyContact, Expense, ExpenseId,
    Gender, MaintenanceTask, Nationality, Payment, PaymentId, PaymentMethod, PaymentStatus,
    PaymentType, Reservation, ReservationId, ReservationStatus, Resident, ResidentId,
    ResidentStatus, Room, RoomId, RoomStatus, RoomType, TaskId, TaskPriority, TaskStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
}

fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid sample timestamp")
}

fn room(id: &str, number: &str, kind: RoomType, gender: Gender, rate: f64) -> Room {
    Room {
        id: RoomId::new(id),
        number: number.to_owned(),
        kind,
        capacity: kind.capacity(),
        current_occupancy: 0,
        status: RoomStatus::Available,
        monthly_rate: rate,
        gender,
    }
}

#[allow(clippy::too_many_arguments)]
fn resident(
    id: &str,
    first: &str,
    last: &str,
    nationality: Nationality,
    room_id: Option<&str>,
    check_in: NaiveDate,
    status: ResidentStatus,
) -> Resident {
    Resident {
        id: ResidentId::new(id),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        nationality,
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        phone: "+54 11 4555-0100".into(),
        emergency_contact: EmergencyContact {
            name: format!("Contacto {last}"),
            phone: "+54 11 4555-0200".into(),
            relationship: "familiar".into(),
        },
        room_id: room_id.map(RoomId::new),
        check_in_date: check_in,
        check_out_date: None,
        status,
        behavior_notes: Vec::new(),
        documents: Vec::new(),
    }
}

pub fn sample_configuration() -> Configuration {
    Configuration::default()
}

pub fn sample_rooms() -> Vec<Room> {
    vec![
        room("room-1a", "1A", RoomType::Individual, Gender::Male, 245.0),
        room("room-2b", "2B", RoomType::Double, Gender::Female, 190.0),
        room("room-3c", "3C", RoomType::Triple, Gender::Male, 165.0),
        room("room-4d", "4D", RoomType::Quadruple, Gender::Female, 150.0),
    ]
}

pub fn sample_residents() -> Vec<Resident> {
    let mut checked_out = resident(
        "resident-lucia",
        "Lucía",
        "Fernández",
        Nationality::Uruguay,
        None,
        date(2024, 8, 1),
        ResidentStatus::Inactive,
    );
    checked_out.check_out_date = Some(date(2025, 2, 28));

    vec![
        // Sentinel for non-resident cash flow; never persisted.
        resident(
            "general-income",
            "Ingresos",
            "Generales",
            Nationality::Argentina,
            None,
            date(2024, 1, 1),
            ResidentStatus::Active,
        ),
        resident(
            "resident-mateo",
            "Mateo",
            "Silva",
            Nationality::Brasil,
            Some("room-1a"),
            date(2025, 2, 10),
            ResidentStatus::Active,
        ),
        resident(
            "resident-valentina",
            "Valentina",
            "Rojas",
            Nationality::Chile,
            Some("room-2b"),
            date(2025, 3, 1),
            ResidentStatus::Active,
        ),
        resident(
            "resident-thiago",
            "Thiago",
            "Benítez",
            Nationality::Paraguay,
            Some("room-3c"),
            date(2025, 4, 15),
            ResidentStatus::Active,
        ),
        // Placeholder synthesized by the open reservation below.
        resident(
            "resident-camila",
            "Camila",
            "Duarte",
            Nationality::Peru,
            Some("room-2b"),
            date(2025, 9, 1),
            ResidentStatus::Pending,
        ),
        checked_out,
    ]
}

pub fn sample_reservations() -> Vec<Reservation> {
    vec![Reservation {
        id: ReservationId::new("reservation-camila"),
        resident_id: ResidentId::new("resident-camila"),
        room_id: RoomId::new("room-2b"),
        start_date: date(2025, 9, 1),
        end_date: date(2025, 12, 20),
        status: ReservationStatus::Pending,
        matricula_amount: 80_000.0,
        discount: Some(Discount {
            kind: DiscountType::Percentage,
            value: 10.0,
        }),
        cancellation_reason: None,
    }]
}

pub fn sample_payments() -> Vec<Payment> {
    let rates = sample_configuration().room_rates_ars;
    vec![
        Payment {
            id: PaymentId::new("payment-matricula-camila"),
            resident_id: ResidentId::new("resident-camila"),
            amount: 80_000.0,
            currency: Currency::Ars,
            method: PaymentMethod::Cash,
            date: ts(2025, 7, 20, 15),
            kind: PaymentType::Matricula,
            status: PaymentStatus::Pending,
            receipt_number: None,
            is_partial_payment: false,
        },
        Payment {
            id: PaymentId::new("payment-monthly-mateo"),
            resident_id: ResidentId::new("resident-mateo"),
            amount: rates.individual,
            currency: Currency::Ars,
            method: PaymentMethod::Cash,
            date: ts(2025, 7, 1, 12),
            kind: PaymentType::MonthlyRent,
            status: PaymentStatus::Pending,
            receipt_number: None,
            is_partial_payment: false,
        },
        Payment {
            id: PaymentId::new("payment-monthly-valentina"),
            resident_id: ResidentId::new("resident-valentina"),
            amount: rates.double,
            currency: Currency::Ars,
            method: PaymentMethod::Transfer,
            date: ts(2025, 7, 3, 10),
            kind: PaymentType::MonthlyRent,
            status: PaymentStatus::Completed,
            receipt_number: Some("0001-00000421".into()),
            is_partial_payment: false,
        },
        Payment {
            id: PaymentId::new("payment-general-laundry"),
            resident_id: ResidentId::general_income(),
            amount: 15_000.0,
            currency: Currency::Ars,
            method: PaymentMethod::Cash,
            date: ts(2025, 7, 5, 18),
            kind: PaymentType::Other,
            status: PaymentStatus::Completed,
            receipt_number: None,
            is_partial_payment: false,
        },
    ]
}

pub fn sample_expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: ExpenseId::new("expense-luz"),
            category: "Luz".into(),
            description: "Edesur julio".into(),
            amount: 96_400.0,
            currency: Currency::Ars,
            date: ts(2025, 7, 8, 9),
            method: PaymentMethod::Transfer,
            receipt: None,
        },
        Expense {
            id: ExpenseId::new("expense-limpieza"),
            category: "Compras Limpieza".into(),
            description: "Lavandina, trapos, bolsas".into(),
            amount: 12_500.0,
            currency: Currency::Ars,
            date: ts(2025, 7, 10, 11),
            method: PaymentMethod::PettyCash,
            receipt: None,
        },
    ]
}

pub fn sample_maintenance_tasks() -> Vec<MaintenanceTask> {
    vec![
        MaintenanceTask {
            id: TaskId::new("task-ducha"),
            area: "Baño 2".into(),
            description: "Pérdida en la ducha".into(),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            assigned_date: ts(2025, 7, 12, 9),
            completed_date: None,
            photos: Vec::new(),
            notes: None,
        },
        MaintenanceTask {
            id: TaskId::new("task-heladera"),
            area: "Heladera 1".into(),
            description: "Cambio de burlete".into(),
            priority: TaskPriority::Medium,
            status: TaskStatus::Completed,
            assigned_date: ts(2025, 6, 20, 9),
            completed_date: Some(ts(2025, 6, 24, 17)),
            photos: Vec::new(),
            notes: Some("Repuesto comprado en Meli".into()),
        },
    ]
}

/// The consolidated demo payload: everything replaced, demo mode on.
pub fn demo_data() -> LoadedData {
    let configuration = sample_configuration();
    let petty_cash = configuration.petty_cash;

    LoadedData {
        residents: Some(sample_residents()),
        rooms: Some(sample_rooms()),
        reservations: Some(sample_reservations()),
        payments: Some(sample_payments()),
        expenses: Some(sample_expenses()),
        maintenance_tasks: Some(sample_maintenance_tasks()),
        configuration: Some(configuration),
        petty_cash: Some(petty_cash),
        is_loading: Some(false),
        is_connected: Some(false),
        is_demo_mode: Some(true),
    }
}
