// ── Domain-to-row type conversions ──
//
// Bridges `casona_store::rows` wire shapes into canonical
// `casona_core::model` domain types and back. Row-to-domain is
// fallible: a malformed row fails the whole load, which the bootstrap
// sequencer turns into the sample-data fallback. Domain-to-row is
// infallible.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use casona_store::rows::{
    ConfigurationRow, ExpenseRow, MaintenanceTaskRow, MonthlyRateHistoryRow, PaymentRow,
    RateTable, ReservationRow, ResidentRow, RoomRow,
};

use crate::error::CoreError;
use crate::model::{
    ConfigId, Configuration, Discount, Expense, ExpenseId, Gender, HistoryId, MaintenanceTask,
    Month, MonthlyRateHistory, Nationality, Payment, PaymentId, Reservation, ReservationId,
    Resident, ResidentId, Room, RoomId, RoomRates, TaskId,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Current instant as an ISO-8601 string with millisecond precision,
/// the format the remote store's timestamp columns carry.
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn date_str(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Parse an ISO timestamp; a bare `YYYY-MM-DD` is read as midnight UTC.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            parse_date(raw)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

/// Parse the date component of an ISO string (the first ten characters).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}

/// The wire spelling of a unit-variant enum value.
fn enum_str<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Parse a wire string back into a unit-variant enum.
fn parse_enum<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_owned())).ok()
}

// ── Residents ──────────────────────────────────────────────────────

impl From<&Resident> for ResidentRow {
    fn from(r: &Resident) -> Self {
        Self {
            id: r.id.as_str().to_owned(),
            first_name: r.first_name.clone(),
            last_name: r.last_name.clone(),
            nationality: enum_str(&r.nationality),
            email: r.email.clone(),
            phone: r.phone.clone(),
            emergency_contact_name: r.emergency_contact.name.clone(),
            emergency_contact_phone: r.emergency_contact.phone.clone(),
            emergency_contact_relationship: r.emergency_contact.relationship.clone(),
            room_id: r.room_id.as_ref().map(|id| id.as_str().to_owned()),
            check_in_date: date_str(r.check_in_date),
            check_out_date: r.check_out_date.map(date_str),
            status: enum_str(&r.status),
            behavior_notes: serde_json::to_value(&r.behavior_notes).ok(),
            documents: serde_json::to_value(&r.documents).ok(),
            updated_at: None,
        }
    }
}

impl TryFrom<ResidentRow> for Resident {
    type Error = CoreError;

    fn try_from(row: ResidentRow) -> Result<Self, Self::Error> {
        let status = parse_enum(&row.status)
            .ok_or_else(|| CoreError::invalid_row("residents", &row.id, "status"))?;
        let check_in_date = parse_date(&row.check_in_date)
            .ok_or_else(|| CoreError::invalid_row("residents", &row.id, "check_in_date"))?;

        Ok(Self {
            id: ResidentId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            // Unknown spellings land on the Other fallback.
            nationality: parse_enum(&row.nationality).unwrap_or(Nationality::Other),
            email: row.email,
            phone: row.phone,
            emergency_contact: crate::model::EmergencyContact {
                name: row.emergency_contact_name,
                phone: row.emergency_contact_phone,
                relationship: row.emergency_contact_relationship,
            },
            room_id: row.room_id.filter(|s| !s.is_empty()).map(RoomId::new),
            check_in_date,
            check_out_date: row.check_out_date.as_deref().and_then(parse_date),
            status,
            behavior_notes: row
                .behavior_notes
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
            documents: row
                .documents
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
        })
    }
}

// ── Rooms ──────────────────────────────────────────────────────────

impl From<&Room> for RoomRow {
    fn from(r: &Room) -> Self {
        Self {
            id: r.id.as_str().to_owned(),
            number: r.number.clone(),
            kind: enum_str(&r.kind),
            capacity: r.capacity,
            current_occupancy: r.current_occupancy,
            status: enum_str(&r.status),
            monthly_rate_usd: r.monthly_rate,
            gender: Some(enum_str(&r.gender)),
            updated_at: None,
        }
    }
}

impl TryFrom<RoomRow> for Room {
    type Error = CoreError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let kind = parse_enum(&row.kind)
            .ok_or_else(|| CoreError::invalid_row("rooms", &row.id, "type"))?;
        let status = parse_enum(&row.status)
            .ok_or_else(|| CoreError::invalid_row("rooms", &row.id, "status"))?;

        Ok(Self {
            id: RoomId::new(row.id),
            number: row.number,
            kind,
            capacity: row.capacity,
            current_occupancy: row.current_occupancy,
            status,
            monthly_rate: row.monthly_rate_usd,
            // Rows predating the gender column default to male, as the
            // original loader did.
            gender: row
                .gender
                .as_deref()
                .and_then(parse_enum)
                .unwrap_or(Gender::Male),
        })
    }
}

// ── Reservations ───────────────────────────────────────────────────

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.as_str().to_owned(),
            resident_id: r.resident_id.as_str().to_owned(),
            room_id: r.room_id.as_str().to_owned(),
            start_date: date_str(r.start_date),
            end_date: date_str(r.end_date),
            status: enum_str(&r.status),
            matricula_amount: r.matricula_amount,
            discount_type: r.discount.map(|d| enum_str(&d.kind)),
            discount_value: r.discount.map(|d| d.value),
            cancellation_reason: r.cancellation_reason.clone(),
        }
    }
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = CoreError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let status = parse_enum(&row.status)
            .ok_or_else(|| CoreError::invalid_row("reservations", &row.id, "status"))?;
        let start_date = parse_date(&row.start_date)
            .ok_or_else(|| CoreError::invalid_row("reservations", &row.id, "start_date"))?;
        let end_date = parse_date(&row.end_date)
            .ok_or_else(|| CoreError::invalid_row("reservations", &row.id, "end_date"))?;

        let discount = match (row.discount_type.as_deref(), row.discount_value) {
            (Some(kind), Some(value)) => parse_enum(kind).map(|kind| Discount { kind, value }),
            _ => None,
        };

        Ok(Self {
            id: ReservationId::new(row.id),
            resident_id: ResidentId::new(row.resident_id),
            room_id: RoomId::new(row.room_id),
            start_date,
            end_date,
            status,
            matricula_amount: row.matricula_amount,
            discount,
            cancellation_reason: row.cancellation_reason,
        })
    }
}

// ── Payments ───────────────────────────────────────────────────────

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.as_str().to_owned(),
            resident_id: p.resident_id.as_str().to_owned(),
            amount: p.amount,
            currency: enum_str(&p.currency),
            method: enum_str(&p.method),
            date: iso(p.date),
            kind: enum_str(&p.kind),
            status: enum_str(&p.status),
            receipt_number: p.receipt_number.clone(),
            is_partial_payment: Some(p.is_partial_payment),
            updated_at: None,
        }
    }
}

impl TryFrom<PaymentRow> for Payment {
    type Error = CoreError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let currency = parse_enum(&row.currency)
            .ok_or_else(|| CoreError::invalid_row("payments", &row.id, "currency"))?;
        let method = parse_enum(&row.method)
            .ok_or_else(|| CoreError::invalid_row("payments", &row.id, "method"))?;
        let kind = parse_enum(&row.kind)
            .ok_or_else(|| CoreError::invalid_row("payments", &row.id, "type"))?;
        let status = parse_enum(&row.status)
            .ok_or_else(|| CoreError::invalid_row("payments", &row.id, "status"))?;
        let date = parse_datetime(&row.date)
            .ok_or_else(|| CoreError::invalid_row("payments", &row.id, "date"))?;

        Ok(Self {
            id: PaymentId::new(row.id),
            resident_id: ResidentId::new(row.resident_id),
            amount: row.amount,
            currency,
            method,
            date,
            kind,
            status,
            receipt_number: row.receipt_number,
            is_partial_payment: row.is_partial_payment.unwrap_or(false),
        })
    }
}

// ── Expenses ───────────────────────────────────────────────────────

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id.as_str().to_owned(),
            category: e.category.clone(),
            amount: e.amount,
            currency: enum_str(&e.currency),
            method: enum_str(&e.method),
            date: iso(e.date),
            description: e.description.clone(),
            receipt: e.receipt.clone(),
            updated_at: None,
        }
    }
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = CoreError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        let currency = parse_enum(&row.currency)
            .ok_or_else(|| CoreError::invalid_row("expenses", &row.id, "currency"))?;
        let method = parse_enum(&row.method)
            .ok_or_else(|| CoreError::invalid_row("expenses", &row.id, "method"))?;
        let date = parse_datetime(&row.date)
            .ok_or_else(|| CoreError::invalid_row("expenses", &row.id, "date"))?;

        Ok(Self {
            id: ExpenseId::new(row.id),
            category: row.category,
            description: row.description,
            amount: row.amount,
            currency,
            date,
            method,
            receipt: row.receipt,
        })
    }
}

// ── Maintenance tasks ──────────────────────────────────────────────

impl From<&MaintenanceTask> for MaintenanceTaskRow {
    fn from(t: &MaintenanceTask) -> Self {
        Self {
            id: t.id.as_str().to_owned(),
            area: t.area.clone(),
            description: t.description.clone(),
            priority: enum_str(&t.priority),
            status: enum_str(&t.status),
            assigned_date: iso(t.assigned_date),
            completed_date: t.completed_date.map(iso),
            photos: Some(t.photos.clone()),
            notes: t.notes.clone(),
            updated_at: None,
        }
    }
}

impl TryFrom<MaintenanceTaskRow> for MaintenanceTask {
    type Error = CoreError;

    fn try_from(row: MaintenanceTaskRow) -> Result<Self, Self::Error> {
        let priority = parse_enum(&row.priority)
            .ok_or_else(|| CoreError::invalid_row("maintenance_tasks", &row.id, "priority"))?;
        let status = parse_enum(&row.status)
            .ok_or_else(|| CoreError::invalid_row("maintenance_tasks", &row.id, "status"))?;
        let assigned_date = parse_datetime(&row.assigned_date).ok_or_else(|| {
            CoreError::invalid_row("maintenance_tasks", &row.id, "assigned_date")
        })?;

        Ok(Self {
            id: TaskId::new(row.id),
            area: row.area,
            description: row.description,
            priority,
            status,
            assigned_date,
            completed_date: row.completed_date.as_deref().and_then(parse_datetime),
            photos: row.photos.unwrap_or_default(),
            notes: row.notes,
        })
    }
}

// ── Rates & configuration ──────────────────────────────────────────

impl From<RateTable> for RoomRates {
    fn from(t: RateTable) -> Self {
        Self {
            individual: t.individual,
            double: t.double,
            triple: t.triple,
            quadruple: t.quadruple,
            quintuple: t.quintuple,
        }
    }
}

impl From<RoomRates> for RateTable {
    fn from(r: RoomRates) -> Self {
        Self {
            individual: r.individual,
            double: r.double,
            triple: r.triple,
            quadruple: r.quadruple,
            quintuple: r.quintuple,
        }
    }
}

impl From<&Configuration> for ConfigurationRow {
    fn from(c: &Configuration) -> Self {
        Self {
            id: c.id.as_str().to_owned(),
            exchange_rate: c.exchange_rate,
            last_updated: iso(c.last_updated),
            room_rates_usd: c.room_rates.into(),
            room_rates_ars: c.room_rates_ars.into(),
            payment_methods: c.payment_methods.clone(),
            expense_categories: c.expense_categories.clone(),
            maintenance_areas: c.maintenance_areas.clone(),
            petty_cash: c.petty_cash,
            updated_at: None,
        }
    }
}

/// Assemble the configuration singleton from its row plus the separate
/// rate-history table.
pub fn configuration_from_rows(
    row: ConfigurationRow,
    history: Vec<MonthlyRateHistoryRow>,
) -> Result<Configuration, CoreError> {
    let last_updated = parse_datetime(&row.last_updated)
        .ok_or_else(|| CoreError::invalid_row("configurations", &row.id, "last_updated"))?;

    let monthly_history = history
        .into_iter()
        .map(MonthlyRateHistory::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Configuration {
        id: ConfigId::new(row.id),
        exchange_rate: row.exchange_rate,
        last_updated,
        room_rates: row.room_rates_usd.into(),
        room_rates_ars: row.room_rates_ars.into(),
        payment_methods: row.payment_methods,
        expense_categories: row.expense_categories,
        maintenance_areas: row.maintenance_areas,
        monthly_history,
        petty_cash: row.petty_cash,
    })
}

impl From<&MonthlyRateHistory> for MonthlyRateHistoryRow {
    fn from(h: &MonthlyRateHistory) -> Self {
        Self {
            id: h.id.as_str().to_owned(),
            month: h.month.as_str().to_owned(),
            exchange_rate: h.exchange_rate,
            room_rates_usd: h.room_rates_usd.into(),
            room_rates_ars: h.room_rates_ars.into(),
            created_date: iso(h.created_date),
            created_by: h.created_by.clone(),
        }
    }
}

impl TryFrom<MonthlyRateHistoryRow> for MonthlyRateHistory {
    type Error = CoreError;

    fn try_from(row: MonthlyRateHistoryRow) -> Result<Self, Self::Error> {
        let month: Month = row
            .month
            .parse()
            .map_err(|_| CoreError::invalid_row("monthly_rate_history", &row.id, "month"))?;
        let created_date = parse_datetime(&row.created_date).ok_or_else(|| {
            CoreError::invalid_row("monthly_rate_history", &row.id, "created_date")
        })?;

        Ok(Self {
            id: HistoryId::new(row.id),
            month,
            exchange_rate: row.exchange_rate,
            room_rates_usd: row.room_rates_usd.into(),
            room_rates_ars: row.room_rates_ars.into(),
            created_date,
            created_by: row.created_by,
        })
    }
}
