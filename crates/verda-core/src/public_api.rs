//! Stable, public-facing engine that wraps the internal service layer.
//!
//! Frontends (CLI, HTTP, FFI) depend on this facade instead of the individual
//! services. All collaborators (record store, clock, bill extractor) are
//! injected; the engine holds no global state.

use std::collections::BTreeMap;

use tracing::{info, warn};
use verda_domain::{
    AccountType, BenchmarkStatus, BillAnalysisResult, Category, CategoryPayload, EmissionAnalysis,
    EmissionRecord, EventStatus, GroceryItem,
};

use crate::{
    aggregation_service::{AggregationService, MonthBucket, MonthlyBreakdown},
    bill_service::BillExtractor,
    classifier_service::ClassifierService,
    extraction::TextExtractor,
    reward_service::{RewardService, WeeklyReward},
    storage::RecordStore,
    suggestion_service::SuggestionService,
    threshold_service::ThresholdService,
    time::Clock,
    trend_service::{TrendComparison, TrendService},
    CoreError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub total_emissions: f64,
    pub breakdown: BTreeMap<Category, f64>,
    pub status_label: EventStatus,
    pub suggestions: Vec<String>,
}

#[derive(Debug)]
/// Outcome of a calculate-and-save request. The calculation completes before
/// any store interaction; only the commit can fail.
pub struct SaveOutcome {
    pub calculation: CalculationResult,
    pub record: EmissionRecord,
    /// Present when the append failed. The computed values above remain
    /// valid and the caller may retry the save independently.
    pub store_error: Option<CoreError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub highest_contributor: Option<Category>,
    pub days_tracked: usize,
    /// True when no history exists and totals should be labelled estimates.
    pub is_estimated: bool,
}

pub struct EmissionsEngine {
    store: Box<dyn RecordStore>,
    clock: Box<dyn Clock>,
    extractor: Box<dyn BillExtractor>,
}

impl EmissionsEngine {
    pub fn new(
        store: Box<dyn RecordStore>,
        clock: Box<dyn Clock>,
        extractor: Box<dyn BillExtractor>,
    ) -> Self {
        Self {
            store,
            clock,
            extractor,
        }
    }

    /// Pure calculation: classify, threshold, suggest. No store interaction.
    pub fn calculate(
        &self,
        payload: &CategoryPayload,
        account: AccountType,
    ) -> Result<CalculationResult, CoreError> {
        let total_emissions = ClassifierService::compute(payload)?;
        let status_label = ThresholdService::event_status(total_emissions, account);
        let suggestions = SuggestionService::for_event(payload.category(), status_label);
        let mut breakdown = BTreeMap::new();
        breakdown.insert(payload.category(), total_emissions);
        Ok(CalculationResult {
            total_emissions,
            breakdown,
            status_label,
            suggestions,
        })
    }

    /// Runs [`Self::calculate`], then appends the resulting record. Invalid
    /// input is the only `Err`; a store failure is reported alongside the
    /// completed calculation.
    pub fn calculate_and_save(
        &self,
        payload: CategoryPayload,
        account: AccountType,
    ) -> Result<SaveOutcome, CoreError> {
        let calculation = self.calculate(&payload, account)?;
        let analysis = EmissionAnalysis {
            status_label: calculation.status_label,
            suggestions: calculation.suggestions.clone(),
        };
        let record = EmissionRecord::new(
            self.clock.now(),
            payload,
            calculation.total_emissions,
            analysis,
        );
        let store_error = match self.store.append(&record) {
            Ok(()) => {
                info!(record_id = %record.id, category = %record.category, "appended emission record");
                None
            }
            Err(err) => {
                warn!(%err, "append failed; returning the unsaved calculation");
                Some(err)
            }
        };
        Ok(SaveOutcome {
            calculation,
            record,
            store_error,
        })
    }

    /// Analyzes free-form bill text. Never fails: ambiguous text yields a
    /// best-guess classification. No store interaction.
    pub fn analyze_bill_text(&mut self, text: &str) -> BillAnalysisResult {
        self.extractor.analyze(text)
    }

    /// Full image pipeline: OCR through the collaborating extractor, then
    /// text analysis. Extraction errors propagate unchanged.
    pub fn analyze_bill_image(
        &mut self,
        extractor: &dyn TextExtractor,
        image: &[u8],
    ) -> Result<BillAnalysisResult, CoreError> {
        let text = extractor.extract_text(image)?;
        Ok(self.analyze_bill_text(&text))
    }

    /// Promotes an ephemeral analysis into a genuine record by translating
    /// its detected items into the category's native payload and submitting
    /// through the normal calculation-and-save path.
    pub fn confirm_analysis(
        &self,
        result: &BillAnalysisResult,
        account: AccountType,
    ) -> Result<SaveOutcome, CoreError> {
        self.calculate_and_save(payload_from_analysis(result), account)
    }

    /// Saved records, newest first, optionally restricted to one category.
    pub fn query_history(
        &self,
        filter: Option<Category>,
    ) -> Result<Vec<EmissionRecord>, CoreError> {
        let mut records = match filter {
            Some(category) => self.store.query_by_category(category)?,
            None => self.store.query_all()?,
        };
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }

    /// Compares a candidate emissions value against the prior record in its
    /// category, as of now.
    pub fn trend_for(
        &self,
        new_emissions: f64,
        category: Category,
    ) -> Result<Option<TrendComparison>, CoreError> {
        let history = self.store.query_by_category(category)?;
        Ok(TrendService::compare(
            new_emissions,
            category,
            self.clock.now(),
            &history,
        ))
    }

    pub fn dashboard_summary(&self) -> Result<DashboardSummary, CoreError> {
        let history = self.store.query_all()?;
        let summary = AggregationService::period_summary(&history, self.clock.today());
        Ok(DashboardSummary {
            daily: summary.daily,
            monthly: summary.monthly,
            yearly: summary.yearly,
            highest_contributor: summary.highest_contributor,
            days_tracked: summary.days_tracked,
            is_estimated: history.is_empty(),
        })
    }

    /// Current-month total measured against the account's benchmark.
    pub fn benchmark_status(&self, account: AccountType) -> Result<BenchmarkStatus, CoreError> {
        let history = self.store.query_all()?;
        let summary = AggregationService::period_summary(&history, self.clock.today());
        Ok(ThresholdService::benchmark_status(summary.monthly, account))
    }

    pub fn weekly_reward(&self) -> Result<WeeklyReward, CoreError> {
        let history = self.store.query_all()?;
        Ok(RewardService::evaluate(&history, self.clock.today()))
    }

    pub fn monthly_breakdown(&self) -> Result<Vec<MonthlyBreakdown>, CoreError> {
        Ok(AggregationService::monthly_breakdown(
            &self.store.query_all()?,
        ))
    }

    pub fn recent_months(&self, count: usize) -> Result<Vec<MonthBucket>, CoreError> {
        Ok(AggregationService::recent_months(
            &self.store.query_all()?,
            count,
            self.clock.today(),
        ))
    }
}

fn payload_from_analysis(result: &BillAnalysisResult) -> CategoryPayload {
    match result.bill_type {
        Category::Grocery => CategoryPayload::Grocery {
            items: result
                .detected_items
                .iter()
                .map(|item| GroceryItem {
                    name: item.name.clone(),
                    quantity: leading_number(&item.quantity).unwrap_or(1.0),
                    unit: trailing_unit(&item.quantity),
                })
                .collect(),
        },
        Category::Electricity => CategoryPayload::Electricity {
            units: first_item_quantity(result),
        },
        Category::Gas => CategoryPayload::Gas {
            kg: first_item_quantity(result),
        },
    }
}

fn first_item_quantity(result: &BillAnalysisResult) -> f64 {
    result
        .detected_items
        .first()
        .and_then(|item| leading_number(&item.quantity))
        .unwrap_or(0.0)
}

/// Parses the leading numeric portion of an extracted quantity string
/// ("5 kg" -> 5.0), mirroring `parseFloat` semantics.
fn leading_number(quantity: &str) -> Option<f64> {
    let trimmed = quantity.trim_start();
    let mut end = 0;
    for (index, ch) in trimmed.char_indices() {
        let part_of_number =
            ch.is_ascii_digit() || ch == '.' || (index == 0 && (ch == '-' || ch == '+'));
        if !part_of_number {
            break;
        }
        end = index + ch.len_utf8();
    }
    trimmed[..end].parse().ok()
}

/// The trailing token of a quantity string ("500 g" -> "g"); falls back to a
/// generic "unit" when there is nothing non-numeric to take.
fn trailing_unit(quantity: &str) -> String {
    quantity
        .trim()
        .rsplit(' ')
        .next()
        .filter(|tail| tail.parse::<f64>().is_err())
        .map(str::to_string)
        .unwrap_or_else(|| "unit".into())
}
