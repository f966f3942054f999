//! Ephemeral bill analysis results.
//!
//! A `BillAnalysisResult` is produced per analysis call and discarded unless
//! the caller promotes it through the normal calculation-and-save path.

use serde::{Deserialize, Serialize};

use crate::{record::Category, status::ImpactTier};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One line item recognized in a bill. `quantity` keeps the raw extracted
/// text ("5 kg", "250 kWh") since extraction precedes parsing.
pub struct DetectedItem {
    pub name: String,
    pub quantity: String,
    pub co2_impact: f64,
}

impl DetectedItem {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, co2_impact: f64) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            co2_impact,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// The item reported as the main cause of the bill's footprint. Always the
/// first detected line, not the largest.
pub struct DominantContributor {
    pub name: String,
    pub impact: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Result of analyzing free-form bill text. Not persisted unless explicitly
/// confirmed by the caller.
pub struct BillAnalysisResult {
    pub bill_type: Category,
    pub carbon_emissions: f64,
    pub status_label: ImpactTier,
    pub dominant_contributor: DominantContributor,
    pub detected_items: Vec<DetectedItem>,
    pub reduction_tips: Vec<String>,
}
