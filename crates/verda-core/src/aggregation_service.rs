//! Calendar bucketing over the record history for dashboards and charts.
//!
//! Buckets follow calendar boundaries (day, month, year) relative to a
//! supplied "now", not fixed-length rolling windows.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use verda_domain::{Category, EmissionRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    /// Total for records dated today.
    pub daily: f64,
    /// Total for the current calendar month.
    pub monthly: f64,
    /// Total for the current calendar year.
    pub yearly: f64,
    pub highest_contributor: Option<Category>,
    /// Number of distinct dates with at least one record.
    pub days_tracked: usize,
}

#[derive(Debug, Clone, PartialEq)]
/// Per-month totals split by category, for tabular breakdowns.
pub struct MonthlyBreakdown {
    pub year: i32,
    pub month: u32,
    pub electricity: f64,
    pub gas: f64,
    pub grocery: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// One charting bucket; months without records carry a zero total.
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub label: &'static str,
    pub total: f64,
}

pub struct AggregationService;

impl AggregationService {
    pub fn period_summary(history: &[EmissionRecord], today: NaiveDate) -> PeriodSummary {
        let mut daily = 0.0;
        let mut monthly = 0.0;
        let mut yearly = 0.0;
        for record in history {
            let date = record.recorded_at.date_naive();
            if date == today {
                daily += record.total_emissions;
            }
            if date.month() == today.month() && date.year() == today.year() {
                monthly += record.total_emissions;
            }
            if date.year() == today.year() {
                yearly += record.total_emissions;
            }
        }
        PeriodSummary {
            daily,
            monthly,
            yearly,
            highest_contributor: Self::highest_contributor(history),
            days_tracked: Self::days_tracked(history),
        }
    }

    /// Argmax over category sums across the full history. Sums accumulate in
    /// category first-encounter order and only a strictly greater sum takes
    /// the lead, so ties keep the earlier category and an all-zero history
    /// yields no contributor.
    pub fn highest_contributor(history: &[EmissionRecord]) -> Option<Category> {
        let mut totals: Vec<(Category, f64)> = Vec::new();
        for record in history {
            match totals.iter_mut().find(|(c, _)| *c == record.category) {
                Some((_, sum)) => *sum += record.total_emissions,
                None => totals.push((record.category, record.total_emissions)),
            }
        }

        let mut best = None;
        let mut max = 0.0;
        for (category, sum) in totals {
            if sum > max {
                max = sum;
                best = Some(category);
            }
        }
        best
    }

    pub fn days_tracked(history: &[EmissionRecord]) -> usize {
        history
            .iter()
            .map(|record| record.recorded_at.date_naive())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Per `(year, month)` totals across the full history, newest first.
    pub fn monthly_breakdown(history: &[EmissionRecord]) -> Vec<MonthlyBreakdown> {
        let mut buckets: BTreeMap<(i32, u32), MonthlyBreakdown> = BTreeMap::new();
        for record in history {
            let date = record.recorded_at.date_naive();
            let entry = buckets
                .entry((date.year(), date.month()))
                .or_insert_with(|| MonthlyBreakdown {
                    year: date.year(),
                    month: date.month(),
                    electricity: 0.0,
                    gas: 0.0,
                    grocery: 0.0,
                    total: 0.0,
                });
            match record.category {
                Category::Electricity => entry.electricity += record.total_emissions,
                Category::Gas => entry.gas += record.total_emissions,
                Category::Grocery => entry.grocery += record.total_emissions,
            }
            entry.total += record.total_emissions;
        }
        buckets.into_values().rev().collect()
    }

    /// The `count` most recent calendar months ending at `today`, oldest
    /// first, zero-filled where no records exist.
    pub fn recent_months(
        history: &[EmissionRecord],
        count: usize,
        today: NaiveDate,
    ) -> Vec<MonthBucket> {
        let mut months = Vec::with_capacity(count);
        for offset in (0..count).rev() {
            let (year, month) = month_back(today.year(), today.month(), offset as i32);
            let total = history
                .iter()
                .filter(|record| {
                    let date = record.recorded_at.date_naive();
                    date.year() == year && date.month() == month
                })
                .map(|record| record.total_emissions)
                .sum();
            months.push(MonthBucket {
                year,
                month,
                label: month_label(month),
                total,
            });
        }
        months
    }
}

fn month_back(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - offset;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

fn month_label(month: u32) -> &'static str {
    const LABELS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    LABELS[(month - 1) as usize]
}
