//! Weekly reduction scoring with a Sunday-anchored week boundary.

use chrono::{Datelike, Duration, NaiveDate};
use verda_domain::EmissionRecord;

/// Progress shown for the very first tracked week, before a baseline exists.
/// A fixed indicator, not a real percentage.
const INITIAL_WEEK_PROGRESS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReward {
    pub this_week: f64,
    pub last_week: f64,
    pub outcome: WeeklyOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeeklyOutcome {
    /// A baseline exists. `reduction_percent` is 0 when emissions did not
    /// drop; `progress_percent` doubles the reduction, clamped to 100.
    Scored {
        reduction_percent: f64,
        progress_percent: f64,
    },
    /// No emissions recorded last week; bootstrap state.
    InitialWeek,
}

impl WeeklyOutcome {
    pub fn progress_percent(&self) -> f64 {
        match self {
            WeeklyOutcome::Scored {
                progress_percent, ..
            } => *progress_percent,
            WeeklyOutcome::InitialWeek => INITIAL_WEEK_PROGRESS,
        }
    }
}

pub struct RewardService;

impl RewardService {
    /// The most recent Sunday on or before `today`.
    pub fn week_start(today: NaiveDate) -> NaiveDate {
        today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
    }

    pub fn evaluate(history: &[EmissionRecord], today: NaiveDate) -> WeeklyReward {
        let start = Self::week_start(today);
        let previous_start = start - Duration::days(7);

        let mut this_week = 0.0;
        let mut last_week = 0.0;
        for record in history {
            let date = record.recorded_at.date_naive();
            if date >= start {
                this_week += record.total_emissions;
            } else if date >= previous_start {
                last_week += record.total_emissions;
            }
        }

        let outcome = if last_week > 0.0 {
            let reduction = (last_week - this_week) / last_week * 100.0;
            if reduction > 0.0 {
                WeeklyOutcome::Scored {
                    reduction_percent: reduction,
                    progress_percent: (reduction * 2.0).min(100.0),
                }
            } else {
                WeeklyOutcome::Scored {
                    reduction_percent: 0.0,
                    progress_percent: 0.0,
                }
            }
        } else {
            WeeklyOutcome::InitialWeek
        };

        WeeklyReward {
            this_week,
            last_week,
            outcome,
        }
    }
}
