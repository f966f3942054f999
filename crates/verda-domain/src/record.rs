//! Domain models for emission records and their category payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, status::EventStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
/// Tracked emission categories. Fixed set; no others are permitted.
pub enum Category {
    Electricity,
    Gas,
    Grocery,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Electricity, Category::Gas, Category::Grocery];

    /// Parses a user-supplied category label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "electricity" => Some(Category::Electricity),
            "gas" => Some(Category::Gas),
            "grocery" => Some(Category::Grocery),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Electricity => "electricity",
            Category::Gas => "gas",
            Category::Grocery => "grocery",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One purchased grocery line. `unit` describes the quantity ("kg", "L",
/// "pcs") and is carried for display.
pub struct GroceryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl GroceryItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
/// Category-specific details captured with a calculation request.
pub enum CategoryPayload {
    Electricity { units: f64 },
    Gas { kg: f64 },
    Grocery { items: Vec<GroceryItem> },
}

impl CategoryPayload {
    /// Returns the category this payload belongs to.
    pub fn category(&self) -> Category {
        match self {
            CategoryPayload::Electricity { .. } => Category::Electricity,
            CategoryPayload::Gas { .. } => Category::Gas,
            CategoryPayload::Grocery { .. } => Category::Grocery,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Classification computed at record creation time and frozen thereafter.
pub struct EmissionAnalysis {
    pub status_label: EventStatus,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One immutable, append-only calculation result. Records are never mutated
/// or deleted once written; ordering is by `recorded_at`.
pub struct EmissionRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub category: Category,
    /// Kilograms CO2e; always non-negative.
    pub total_emissions: f64,
    pub details: CategoryPayload,
    pub analysis: EmissionAnalysis,
}

impl EmissionRecord {
    pub fn new(
        recorded_at: DateTime<Utc>,
        details: CategoryPayload,
        total_emissions: f64,
        analysis: EmissionAnalysis,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at,
            category: details.category(),
            total_emissions,
            details,
            analysis,
        }
    }
}

impl Identifiable for EmissionRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for EmissionRecord {
    fn display_label(&self) -> String {
        format!(
            "{} {} {:.2} kg CO2e",
            self.recorded_at.format("%Y-%m-%d"),
            self.category,
            self.total_emissions
        )
    }
}
