//! TOML-based session configuration and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::io::export::DEFAULT_FILE_NAME;
use crate::ledger::types::parse_timestamp;
use crate::ledger::{
    HISTORY_CAPACITY, History, LedgerState, MAX_STORED_ENERGY_KWH, Transaction, TransactionKind,
};

/// Top-level session configuration parsed from TOML.
///
/// All fields have defaults matching the demo dashboard. Load from TOML with
/// [`SessionConfig::from_toml_file`] or use [`SessionConfig::demo`] for the
/// built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seed balances and history.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// History export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Seed balances and history for a new ledger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Starting point balance.
    pub credit_points: u64,
    /// Starting stored energy (kWh, finite and >= 0).
    pub stored_energy_kwh: f64,
    /// Seed transactions, newest first (at most 20).
    pub history: Vec<SeedTransaction>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            credit_points: 1200,
            stored_energy_kwh: 48.0,
            history: vec![
                SeedTransaction::new(1, TransactionKind::Sell, 200, 8.0, "2025-09-28 09:12"),
                SeedTransaction::new(2, TransactionKind::Sell, 500, 20.0, "2025-09-26 18:40"),
                SeedTransaction::new(3, TransactionKind::Buy, -100, -4.0, "2025-09-21 07:55"),
            ],
        }
    }
}

/// One seed history row, using the export column names.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedTransaction {
    pub id: u64,
    /// `"sell"` or `"buy"`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed point change.
    pub points: i64,
    /// Signed energy change (kWh).
    pub kwh: f64,
    /// `YYYY-MM-DD HH:MM[:SS]`.
    pub date: String,
}

impl SeedTransaction {
    fn new(id: u64, kind: TransactionKind, points: i64, kwh: f64, date: &str) -> Self {
        Self {
            id,
            kind,
            points,
            kwh,
            date: date.to_string(),
        }
    }
}

/// History export settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// File name offered for CSV downloads (no directory components).
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"ledger.stored_energy_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SessionConfig {
    /// Returns the demo session: 1200 pts, 48 kWh, three seed transactions.
    pub fn demo() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            export: ExportConfig::default(),
        }
    }

    /// Returns an empty session: no points, no energy, no history.
    pub fn empty() -> Self {
        Self {
            ledger: LedgerConfig {
                credit_points: 0,
                stored_energy_kwh: 0.0,
                history: Vec::new(),
            },
            export: ExportConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "empty"];

    /// Loads a session from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "empty" => Ok(Self::empty()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a session from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a session from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let l = &self.ledger;

        if !l.stored_energy_kwh.is_finite() || l.stored_energy_kwh < 0.0 {
            errors.push(ConfigError::new(
                "ledger.stored_energy_kwh",
                "must be finite and >= 0",
            ));
        } else if l.stored_energy_kwh > MAX_STORED_ENERGY_KWH {
            errors.push(ConfigError::new(
                "ledger.stored_energy_kwh",
                format!("must be <= {MAX_STORED_ENERGY_KWH}"),
            ));
        }
        if l.history.len() > HISTORY_CAPACITY {
            errors.push(ConfigError::new(
                "ledger.history",
                format!("at most {HISTORY_CAPACITY} entries, got {}", l.history.len()),
            ));
        }

        let mut seen = HashSet::new();
        for (i, seed) in l.history.iter().enumerate() {
            let field = |name: &str| format!("ledger.history[{i}].{name}");
            if !seen.insert(seed.id) {
                errors.push(ConfigError::new(field("id"), format!("duplicate id {}", seed.id)));
            }
            if !seed.kwh.is_finite() {
                errors.push(ConfigError::new(field("kwh"), "must be finite"));
            }
            let signs_ok = match seed.kind {
                TransactionKind::Sell => seed.points >= 0 && seed.kwh >= 0.0,
                TransactionKind::Buy => seed.points <= 0 && seed.kwh <= 0.0,
            };
            if !signs_ok {
                errors.push(ConfigError::new(
                    field("points"),
                    format!(
                        "sign does not match type \"{}\" (sell: >= 0, buy: <= 0)",
                        seed.kind
                    ),
                ));
            }
            if let Err(e) = parse_timestamp(&seed.date) {
                errors.push(ConfigError::new(
                    field("date"),
                    format!("\"{}\" is not YYYY-MM-DD HH:MM[:SS]: {e}", seed.date),
                ));
            }
        }

        let name = &self.export.file_name;
        if name.trim().is_empty() {
            errors.push(ConfigError::new("export.file_name", "must not be empty"));
        } else if name.contains(['/', '\\']) {
            errors.push(ConfigError::new(
                "export.file_name",
                "must be a bare file name without directories",
            ));
        }

        errors
    }

    /// Builds the initial ledger state from the seed configuration.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` if a seed row or balance is invalid.
    /// Call [`SessionConfig::validate`] first to collect every problem.
    pub fn build_state(&self) -> Result<LedgerState, ConfigError> {
        let mut seeds = Vec::with_capacity(self.ledger.history.len());
        for (i, seed) in self.ledger.history.iter().enumerate() {
            let timestamp = parse_timestamp(&seed.date).map_err(|e| {
                ConfigError::new(format!("ledger.history[{i}].date"), e.to_string())
            })?;
            seeds.push(Transaction {
                id: seed.id,
                kind: seed.kind,
                points_delta: seed.points,
                energy_delta_kwh: seed.kwh,
                timestamp,
            });
        }

        LedgerState::new(
            self.ledger.credit_points,
            self.ledger.stored_energy_kwh,
            History::from_newest_first(seeds),
        )
        .map_err(|e| ConfigError::new("ledger", e.to_string()))
    }
}
