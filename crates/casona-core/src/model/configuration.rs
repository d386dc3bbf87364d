// ── Configuration and rate history ──

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{ConfigId, HistoryId};
use super::room::RoomType;

/// The rate-history log keeps only this many most-recent entries.
pub const HISTORY_CAP: usize = 24;

// ── Month ───────────────────────────────────────────────────────────

/// A `YYYY-MM` month key.
///
/// Zero-padded so that lexicographic order is chronological order --
/// the history log is sorted by plain string comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Month(String);

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return None;
        }
        Some(Self(format!("{year:04}-{month:02}")))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(2, '-').collect();
        let valid = parts.len() == 2
            && parts[0].len() == 4
            && parts[1].len() == 2
            && parts[0].parse::<i32>().is_ok()
            && parts[1].parse::<u32>().is_ok_and(|m| (1..=12).contains(&m));
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(format!("invalid month key: {s} (expected YYYY-MM)"))
        }
    }
}

// ── Room rates ──────────────────────────────────────────────────────

/// Per-tier monthly rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomRates {
    pub individual: f64,
    pub double: f64,
    pub triple: f64,
    pub quadruple: f64,
    pub quintuple: f64,
}

impl RoomRates {
    pub fn get(&self, kind: RoomType) -> f64 {
        match kind {
            RoomType::Individual => self.individual,
            RoomType::Double => self.double,
            RoomType::Triple => self.triple,
            RoomType::Quadruple => self.quadruple,
            RoomType::Quintuple => self.quintuple,
        }
    }

    /// Convert a USD rate table to ARS, rounding each tier to a whole
    /// unit.
    pub fn to_ars(&self, exchange_rate: f64) -> Self {
        Self {
            individual: (self.individual * exchange_rate).round(),
            double: (self.double * exchange_rate).round(),
            triple: (self.triple * exchange_rate).round(),
            quadruple: (self.quadruple * exchange_rate).round(),
            quintuple: (self.quintuple * exchange_rate).round(),
        }
    }
}

// ── Rate history ────────────────────────────────────────────────────

/// A snapshot of the rate tables at one month, upserted by month key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRateHistory {
    pub id: HistoryId,
    pub month: Month,
    pub exchange_rate: f64,
    pub room_rates_usd: RoomRates,
    pub room_rates_ars: RoomRates,
    pub created_date: DateTime<Utc>,
    pub created_by: String,
}

// ── Configuration ───────────────────────────────────────────────────

/// Process-wide configuration singleton.
///
/// `petty_cash` here is the persisted seed of the balance; at runtime
/// the authoritative value is the state snapshot's top-level scalar,
/// hydrated from this field at load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub id: ConfigId,
    /// USD -> ARS.
    pub exchange_rate: f64,
    pub last_updated: DateTime<Utc>,
    /// USD rates per tier.
    pub room_rates: RoomRates,
    /// ARS rates per tier; derived from `room_rates` by default but
    /// manually overridable.
    pub room_rates_ars: RoomRates,
    pub payment_methods: Vec<String>,
    pub expense_categories: Vec<String>,
    pub maintenance_areas: Vec<String>,
    /// Most-recent-first, capped at [`HISTORY_CAP`] entries.
    pub monthly_history: Vec<MonthlyRateHistory>,
    pub petty_cash: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        let exchange_rate = 1300.0;
        let room_rates = RoomRates {
            individual: 245.0,
            double: 190.0,
            triple: 165.0,
            quadruple: 150.0,
            quintuple: 135.0,
        };
        Self {
            id: ConfigId::new("default-config-id"),
            exchange_rate,
            last_updated: Utc::now(),
            room_rates,
            room_rates_ars: room_rates.to_ars(exchange_rate),
            payment_methods: vec!["cash".into(), "transfer".into()],
            expense_categories: [
                "Alquiler",
                "Aysa",
                "Luz",
                "ABL",
                "Wifi",
                "Seguro",
                "Compras Limpieza",
                "Meli",
                "Eduardo",
                "Honorarios Cont",
                "Mantenimiento Edu",
                "IIBB",
                "Mantenimiento",
                "Monotributo",
                "Publicidad",
                "Serv. Emergencias",
                "Fumig. y Limp. Tanques",
                "Inversión/Mejora",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            maintenance_areas: [
                "Habitación",
                "Sala de Estar",
                "Escalera principal",
                "Escalera Terraza",
                "Pasillo",
                "Oficina",
                "Hall",
                "Cocina 1",
                "Cocina 2",
                "Cocina 3",
                "Baño 1",
                "Baño 2",
                "Baño 3",
                "Baño 4",
                "Baño 5",
                "Heladera 1",
                "Heladera 2",
                "Heladera 3",
                "Heladera 4",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            monthly_history: Vec::new(),
            petty_cash: 50_000.0,
        }
    }
}
