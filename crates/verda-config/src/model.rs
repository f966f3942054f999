use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const LEDGER_FILE_NAME: &str = "records.json";

/// User-facing preferences plus the location of the on-disk ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for emission data. Defaults to
    /// `~/Documents/Verda`.
    pub data_root: Option<PathBuf>,

    /// Account profile assumed when a command does not name one. Unknown
    /// values are treated as `individual` downstream.
    #[serde(default = "Config::default_account_type_value")]
    pub default_account_type: String,

    /// How many months the emissions chart spans.
    #[serde(default = "Config::default_chart_months")]
    pub chart_months: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: None,
            default_account_type: Self::default_account_type_value(),
            chart_months: Self::default_chart_months(),
        }
    }
}

impl Config {
    pub fn default_account_type_value() -> String {
        "individual".into()
    }

    pub fn default_chart_months() -> u32 {
        6
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Verda")
    }

    /// Full path of the JSON ledger file under the resolved data root.
    pub fn ledger_path(&self) -> PathBuf {
        self.resolve_data_root().join(LEDGER_FILE_NAME)
    }
}
