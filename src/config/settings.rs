//! User settings for the ledger
//!
//! Stored as `config.json` in the base directory. Every field has a default,
//! so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::storage::file_io::{read_text, write_json_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Append the totals block to CSV exports
    #[serde(default = "default_true")]
    pub export_include_totals: bool,

    /// Width in characters of the longest chart bar
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    /// Write the JSONL audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_true() -> bool {
    true
}

fn default_chart_width() -> usize {
    40
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            export_include_totals: true,
            chart_width: default_chart_width(),
            audit_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        match read_text(paths.settings_file())? {
            Some(contents) => serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            }),
            None => Ok(Settings::default()),
        }
    }

    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Set one field from its `config.json` name and a string value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let invalid = |expected: &str| {
            LedgerError::Validation(format!(
                "Invalid value '{}' for {}: expected {}",
                value, key, expected
            ))
        };

        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "export_include_totals" => {
                self.export_include_totals = value.parse().map_err(|_| invalid("true or false"))?
            }
            "chart_width" => {
                let width: usize = value.parse().map_err(|_| invalid("a positive number"))?;
                if width == 0 {
                    return Err(invalid("a positive number"));
                }
                self.chart_width = width;
            }
            "audit_enabled" => {
                self.audit_enabled = value.parse().map_err(|_| invalid("true or false"))?
            }
            _ => {
                return Err(LedgerError::Config(format!(
                    "Unknown setting '{}' (known: {})",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Names accepted by `set`
    pub const KEYS: [&'static str; 4] = [
        "currency_symbol",
        "export_include_totals",
        "chart_width",
        "audit_enabled",
    ];
}
