//! Improved/regressed/stable verdicts against the prior record in a category.

use chrono::{DateTime, Utc};
use verda_domain::{Category, EmissionRecord, TrendStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct TrendComparison {
    pub status: TrendStatus,
    /// Absolute change in kg CO2e relative to the prior record.
    pub difference: f64,
}

pub struct TrendService;

impl TrendService {
    /// Compares `new_emissions` to the most recent record of `category`
    /// strictly before `new_instant`. No prior record, no comparison.
    pub fn compare(
        new_emissions: f64,
        category: Category,
        new_instant: DateTime<Utc>,
        history: &[EmissionRecord],
    ) -> Option<TrendComparison> {
        let prior = history
            .iter()
            .filter(|record| record.category == category && record.recorded_at < new_instant)
            .max_by_key(|record| record.recorded_at)?;

        let status = if new_emissions < prior.total_emissions {
            TrendStatus::Improved
        } else if new_emissions > prior.total_emissions {
            TrendStatus::Regressed
        } else {
            TrendStatus::Stable
        };
        Some(TrendComparison {
            status,
            difference: (new_emissions - prior.total_emissions).abs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use verda_domain::{CategoryPayload, EmissionAnalysis, EventStatus, GroceryItem};

    use super::*;

    fn grocery_record(kg: f64, day: u32) -> EmissionRecord {
        EmissionRecord::new(
            Utc.with_ymd_and_hms(2026, 4, day, 10, 0, 0).unwrap(),
            CategoryPayload::Grocery {
                items: vec![GroceryItem::new("Rice", kg * 2.0, "kg")],
            },
            kg,
            EmissionAnalysis {
                status_label: EventStatus::Ok,
                suggestions: Vec::new(),
            },
        )
    }

    #[test]
    fn lower_emissions_read_as_improvement() {
        let history = vec![grocery_record(20.0, 1)];
        let now = Utc.with_ymd_and_hms(2026, 4, 2, 10, 0, 0).unwrap();

        let comparison =
            TrendService::compare(15.0, Category::Grocery, now, &history).expect("comparison");
        assert_eq!(comparison.status, TrendStatus::Improved);
        assert_eq!(comparison.difference, 5.0);
    }

    #[test]
    fn no_prior_record_emits_no_comparison() {
        let history = vec![grocery_record(20.0, 1)];
        let now = Utc.with_ymd_and_hms(2026, 4, 2, 10, 0, 0).unwrap();
        assert!(TrendService::compare(15.0, Category::Gas, now, &history).is_none());
        assert!(TrendService::compare(15.0, Category::Grocery, now, &[]).is_none());
    }

    #[test]
    fn most_recent_prior_record_wins() {
        let history = vec![grocery_record(30.0, 1), grocery_record(10.0, 3)];
        let now = Utc.with_ymd_and_hms(2026, 4, 5, 10, 0, 0).unwrap();

        let comparison =
            TrendService::compare(12.0, Category::Grocery, now, &history).expect("comparison");
        assert_eq!(comparison.status, TrendStatus::Regressed);
        assert!((comparison.difference - 2.0).abs() < 1e-12);
    }

    #[test]
    fn records_at_or_after_the_new_instant_are_ignored() {
        let history = vec![grocery_record(30.0, 5)];
        let now = Utc.with_ymd_and_hms(2026, 4, 5, 10, 0, 0).unwrap();
        assert!(TrendService::compare(12.0, Category::Grocery, now, &history).is_none());
    }

    #[test]
    fn equal_emissions_are_stable() {
        let history = vec![grocery_record(20.0, 1)];
        let now = Utc.with_ymd_and_hms(2026, 4, 2, 10, 0, 0).unwrap();

        let comparison =
            TrendService::compare(20.0, Category::Grocery, now, &history).expect("comparison");
        assert_eq!(comparison.status, TrendStatus::Stable);
        assert_eq!(comparison.difference, 0.0);
    }
}
