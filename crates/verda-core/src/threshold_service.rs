//! Threshold schemes classifying emission values.
//!
//! Three independent schemes coexist on purpose: the binary per-event check
//! applied when saving, the four-tier scale used by bill analysis, and the
//! monthly benchmark shown on the dashboard. They are never unified.

use verda_domain::{AccountType, BenchmarkStatus, EventStatus, ImpactTier};

pub const INDIVIDUAL_EVENT_LIMIT_KG: f64 = 50.0;
pub const FAMILY_EVENT_LIMIT_KG: f64 = 150.0;

pub const INDIVIDUAL_MONTHLY_BENCHMARK_KG: f64 = 250.0;
pub const FAMILY_MONTHLY_BENCHMARK_KG: f64 = 950.0;

pub struct ThresholdService;

impl ThresholdService {
    pub fn event_limit(account: AccountType) -> f64 {
        match account {
            AccountType::Individual => INDIVIDUAL_EVENT_LIMIT_KG,
            AccountType::Family => FAMILY_EVENT_LIMIT_KG,
        }
    }

    /// Binary per-event scheme. The limit itself is still Ok; only values
    /// strictly above it are flagged.
    pub fn event_status(emissions: f64, account: AccountType) -> EventStatus {
        if emissions > Self::event_limit(account) {
            EventStatus::Danger
        } else {
            EventStatus::Ok
        }
    }

    /// Four-tier scheme for bill analysis. Tier membership is
    /// `value < upper bound`, so each boundary belongs to the next tier up.
    pub fn impact_tier(emissions: f64) -> ImpactTier {
        if emissions < 10.0 {
            ImpactTier::Excellent
        } else if emissions < 25.0 {
            ImpactTier::Good
        } else if emissions < 50.0 {
            ImpactTier::Fair
        } else {
            ImpactTier::High
        }
    }

    pub fn monthly_benchmark(account: AccountType) -> f64 {
        match account {
            AccountType::Individual => INDIVIDUAL_MONTHLY_BENCHMARK_KG,
            AccountType::Family => FAMILY_MONTHLY_BENCHMARK_KG,
        }
    }

    /// Monthly-benchmark scheme for dashboard display. Operates on the
    /// aggregated monthly total, not single events.
    pub fn benchmark_status(monthly_total: f64, account: AccountType) -> BenchmarkStatus {
        let benchmark = Self::monthly_benchmark(account);
        if monthly_total < benchmark * 0.9 {
            BenchmarkStatus::Below
        } else if monthly_total <= benchmark * 1.1 {
            BenchmarkStatus::Around
        } else {
            BenchmarkStatus::Above
        }
    }
}
