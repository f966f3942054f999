//! Status labels produced by the threshold and trend schemes.
//!
//! Each enum serializes as its user-facing label so persisted records and
//! rendered output stay in sync.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Binary per-event classification applied when saving a calculation.
pub enum EventStatus {
    #[serde(rename = "Ok - Within Efficient Limits")]
    Ok,
    #[serde(rename = "Danger - High Impact")]
    Danger,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventStatus::Ok => "Ok - Within Efficient Limits",
            EventStatus::Danger => "Danger - High Impact",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Four-tier classification applied to bill analysis results only.
pub enum ImpactTier {
    #[serde(rename = "Excellent - Low Impact")]
    Excellent,
    #[serde(rename = "Good - Sustainable")]
    Good,
    #[serde(rename = "Fair - Average Usage")]
    Fair,
    #[serde(rename = "High - Attention Needed")]
    High,
}

impl fmt::Display for ImpactTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImpactTier::Excellent => "Excellent - Low Impact",
            ImpactTier::Good => "Good - Sustainable",
            ImpactTier::Fair => "Fair - Average Usage",
            ImpactTier::High => "High - Attention Needed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Monthly-benchmark classification shown on the dashboard. Operates on
/// aggregated monthly totals and is never persisted on a record.
pub enum BenchmarkStatus {
    #[serde(rename = "Below Indian Average")]
    Below,
    #[serde(rename = "Around Indian Average")]
    Around,
    #[serde(rename = "Above Indian Average")]
    Above,
}

impl fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BenchmarkStatus::Below => "Below Indian Average",
            BenchmarkStatus::Around => "Around Indian Average",
            BenchmarkStatus::Above => "Above Indian Average",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Verdict between a new submission and the prior record in its category.
pub enum TrendStatus {
    Improved,
    Regressed,
    Stable,
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendStatus::Improved => "improved",
            TrendStatus::Regressed => "regressed",
            TrendStatus::Stable => "stable",
        };
        f.write_str(label)
    }
}
