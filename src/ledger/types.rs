//! Core ledger types: transactions, snapshots, and the fixed exchange rate.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed exchange rate between stored energy and credit points.
///
/// Used symmetrically by sells and buys; no spread or fee is modeled.
pub const POINTS_PER_KWH: u64 = 25;

/// Largest stored-energy balance a ledger accepts (kWh).
///
/// Keeps `round_to_2` intermediates finite and every point delta within `i64`.
pub const MAX_STORED_ENERGY_KWH: f64 = 1e12;

/// Maximum number of transactions retained in a ledger's history.
pub const HISTORY_CAPACITY: usize = 20;

/// Rendering format for transaction timestamps (CSV export, JSON, display).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shorter format accepted on input (seed history written to the minute).
const TIMESTAMP_FORMAT_MINUTES: &str = "%Y-%m-%d %H:%M";

/// Direction of an energy-credit trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Stored energy sold to the grid in exchange for points.
    Sell,
    /// Points spent to top up stored energy.
    Buy,
}

impl TransactionKind {
    /// Wire name used in CSV export and JSON (`"sell"` / `"buy"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sell => "sell",
            Self::Buy => "buy",
        }
    }

    /// Human-readable label for dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sell => "Sold to Grid",
            Self::Buy => "Bought Energy",
        }
    }

    /// Parses a wire name back into a kind.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "sell" => Some(Self::Sell),
            "buy" => Some(Self::Buy),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One committed trade. Produced exactly once per successful operation.
///
/// # Sign Convention
/// - Sell: `points_delta > 0` (earned), `energy_delta_kwh > 0` (amount sold)
/// - Buy: `points_delta < 0` (spent), `energy_delta_kwh < 0` (negated amount bought)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Session-unique identifier, monotonic in insertion order.
    pub id: u64,
    /// Trade direction.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed point change.
    pub points_delta: i64,
    /// Signed energy change (kWh).
    pub energy_delta_kwh: f64,
    /// Creation time, whole seconds.
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Record of `kwh_sold` leaving storage for `points_earned` points.
    pub fn sell(id: u64, kwh_sold: f64, points_earned: i64, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            kind: TransactionKind::Sell,
            points_delta: points_earned,
            energy_delta_kwh: kwh_sold,
            timestamp,
        }
    }

    /// Record of `points_spent` points buying `kwh_bought` into storage.
    pub fn buy(id: u64, points_spent: i64, kwh_bought: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            kind: TransactionKind::Buy,
            points_delta: -points_spent,
            energy_delta_kwh: -kwh_bought,
            timestamp,
        }
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    pub fn date(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<4} {:<14} {:>+7} pts {:>8} kWh  {}",
            self.id,
            self.kind.label(),
            self.points_delta,
            self.energy_delta_kwh,
            self.date(),
        )
    }
}

/// Parses a timestamp in [`TIMESTAMP_FORMAT`], or the same format without seconds.
///
/// # Errors
///
/// Returns the `chrono` parse error of the full-precision format if neither matches.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|e| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT_MINUTES).map_err(|_| e))
}

/// Read-only view of a ledger exposed for rendering after every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Spendable points balance.
    pub credit_points: u64,
    /// Stored energy balance (kWh).
    pub stored_energy_kwh: f64,
    /// Energy the current points would buy (kWh, 2 decimals).
    pub estimated_value_kwh: f64,
    /// Transaction history, newest first.
    pub transactions: Vec<Transaction>,
}

impl fmt::Display for LedgerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Energy Credits ---")?;
        writeln!(f, "Credits:          {} pts", self.credit_points)?;
        writeln!(f, "Stored energy:    {} kWh", self.stored_energy_kwh)?;
        writeln!(f, "Estimated value:  ≈ {} kWh", self.estimated_value_kwh)?;
        write!(f, "Recent transactions ({}):", self.transactions.len())?;
        for tx in &self.transactions {
            write!(f, "\n  {tx}")?;
        }
        Ok(())
    }
}

mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{TIMESTAMP_FORMAT, parse_timestamp};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
