//! Shared traits and account primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Account profile affecting threshold selection. Never stored on a record.
pub enum AccountType {
    #[default]
    Individual,
    Family,
}

impl AccountType {
    /// Parses a user-supplied label. Anything other than "family" falls back
    /// to the individual profile.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "family" => AccountType::Family,
            _ => AccountType::Individual,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountType::Individual => "individual",
            AccountType::Family => "family",
        };
        f.write_str(label)
    }
}
