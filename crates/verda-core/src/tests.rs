use chrono::{TimeZone, Utc};
use verda_domain::{
    AccountType, BenchmarkStatus, Category, CategoryPayload, EmissionAnalysis, EmissionRecord,
    EventStatus, GroceryItem, TrendStatus,
};

use crate::{
    bill_service::RuleBasedMockExtractor, extraction::TextExtractor,
    public_api::EmissionsEngine, random::StdRandom, storage::MemoryRecordStore,
    storage::RecordStore, time::FixedClock, CoreError,
};

const NOW: (i32, u32, u32, u32) = (2026, 7, 15, 12);

fn fixed_now() -> chrono::DateTime<Utc> {
    let (year, month, day, hour) = NOW;
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

fn seeded_engine(store: MemoryRecordStore) -> EmissionsEngine {
    EmissionsEngine::new(
        Box::new(store),
        Box::new(FixedClock(fixed_now())),
        Box::new(RuleBasedMockExtractor::new(StdRandom::seeded(42))),
    )
}

fn past_record(days_ago: i64, category: Category, kg: f64) -> EmissionRecord {
    let details = match category {
        Category::Electricity => CategoryPayload::Electricity { units: kg },
        Category::Gas => CategoryPayload::Gas { kg },
        Category::Grocery => CategoryPayload::Grocery {
            items: vec![GroceryItem::new("Rice", kg * 2.0, "kg")],
        },
    };
    EmissionRecord::new(
        fixed_now() - chrono::Duration::days(days_ago),
        details,
        kg,
        EmissionAnalysis {
            status_label: EventStatus::Ok,
            suggestions: Vec::new(),
        },
    )
}

struct FailingStore;

impl RecordStore for FailingStore {
    fn append(&self, _record: &EmissionRecord) -> Result<(), CoreError> {
        Err(CoreError::StoreUnavailable("disk full".into()))
    }

    fn query_all(&self) -> Result<Vec<EmissionRecord>, CoreError> {
        Ok(Vec::new())
    }

    fn query_by_category(&self, _category: Category) -> Result<Vec<EmissionRecord>, CoreError> {
        Ok(Vec::new())
    }
}

#[test]
fn calculate_is_pure_and_complete() {
    let engine = seeded_engine(MemoryRecordStore::new());
    let payload = CategoryPayload::Electricity { units: 100.0 };

    let result = engine
        .calculate(&payload, AccountType::Individual)
        .expect("calculation");
    assert_eq!(result.total_emissions, 85.0);
    // 85 kg exceeds the 50 kg individual limit.
    assert_eq!(result.status_label, EventStatus::Danger);
    assert_eq!(result.breakdown.get(&Category::Electricity), Some(&85.0));
    assert_eq!(result.suggestions.len(), 3);
    assert!(result.suggestions[0].contains("LED"));

    // No store interaction: history stays empty.
    assert!(engine.query_history(None).unwrap().is_empty());

    let again = engine
        .calculate(&payload, AccountType::Individual)
        .expect("calculation");
    assert_eq!(again, result);
}

#[test]
fn family_limit_keeps_the_same_value_within_bounds() {
    let engine = seeded_engine(MemoryRecordStore::new());
    let payload = CategoryPayload::Electricity { units: 100.0 };

    let result = engine
        .calculate(&payload, AccountType::Family)
        .expect("calculation");
    assert_eq!(result.status_label, EventStatus::Ok);
    assert_eq!(result.suggestions[0], "Great job! Keep maintaining this efficiency.");
}

#[test]
fn calculate_and_save_appends_a_frozen_record() {
    let engine = seeded_engine(MemoryRecordStore::new());

    let outcome = engine
        .calculate_and_save(CategoryPayload::Gas { kg: 10.0 }, AccountType::Individual)
        .expect("save");
    assert!(outcome.store_error.is_none());
    assert_eq!(outcome.record.total_emissions, 29.8);
    assert_eq!(outcome.record.recorded_at, fixed_now());
    assert_eq!(outcome.record.analysis.status_label, EventStatus::Ok);

    let history = engine.query_history(Some(Category::Gas)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, outcome.record.id);
}

#[test]
fn invalid_input_writes_nothing() {
    let engine = seeded_engine(MemoryRecordStore::new());

    let err = engine
        .calculate_and_save(CategoryPayload::Gas { kg: 0.0 }, AccountType::Individual)
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput { .. }));
    assert!(engine.query_history(None).unwrap().is_empty());
}

#[test]
fn store_failure_still_returns_the_computation() {
    let engine = EmissionsEngine::new(
        Box::new(FailingStore),
        Box::new(FixedClock(fixed_now())),
        Box::new(RuleBasedMockExtractor::new(StdRandom::seeded(1))),
    );

    let outcome = engine
        .calculate_and_save(CategoryPayload::Gas { kg: 10.0 }, AccountType::Family)
        .expect("computation survives the failed commit");
    assert_eq!(outcome.calculation.total_emissions, 29.8);
    assert!(matches!(
        outcome.store_error,
        Some(CoreError::StoreUnavailable(_))
    ));
}

#[test]
fn query_history_sorts_newest_first() {
    let store = MemoryRecordStore::new();
    store.append(&past_record(3, Category::Gas, 5.0)).unwrap();
    store.append(&past_record(1, Category::Grocery, 2.0)).unwrap();
    store.append(&past_record(2, Category::Gas, 7.0)).unwrap();
    let engine = seeded_engine(store);

    let history = engine.query_history(None).unwrap();
    assert_eq!(history.len(), 3);
    assert!(history[0].recorded_at > history[1].recorded_at);
    assert!(history[1].recorded_at > history[2].recorded_at);

    let gas_only = engine.query_history(Some(Category::Gas)).unwrap();
    assert_eq!(gas_only.len(), 2);
    assert_eq!(gas_only[0].total_emissions, 7.0);
}

#[test]
fn confirm_analysis_recomputes_through_the_calculation_path() {
    let mut engine = seeded_engine(MemoryRecordStore::new());

    let analysis = engine.analyze_bill_text("electricity bill for June");
    assert_eq!(analysis.bill_type, Category::Electricity);
    let units: f64 = analysis.detected_items[0]
        .quantity
        .strip_suffix(" kWh")
        .unwrap()
        .parse()
        .unwrap();

    let outcome = engine
        .confirm_analysis(&analysis, AccountType::Family)
        .expect("confirm");
    // The promoted record re-derives emissions from the detected units; the
    // perturbed analysis value is discarded.
    assert_eq!(outcome.record.total_emissions, units * 0.85);
    assert_eq!(outcome.record.category, Category::Electricity);
    assert_eq!(engine.query_history(None).unwrap().len(), 1);
}

#[test]
fn confirm_analysis_translates_grocery_items() {
    let mut engine = seeded_engine(MemoryRecordStore::new());

    let analysis = engine.analyze_bill_text("grocery store receipt");
    let outcome = engine
        .confirm_analysis(&analysis, AccountType::Family)
        .expect("confirm");

    match &outcome.record.details {
        CategoryPayload::Grocery { items } => {
            assert_eq!(items.len(), 5);
            assert_eq!(items[0].name, "Organic Apples");
            assert_eq!(items[0].quantity, 1.0);
            assert_eq!(items[0].unit, "kg");
            assert_eq!(items[3].quantity, 500.0);
            assert_eq!(items[3].unit, "g");
        }
        other => panic!("unexpected payload {other:?}"),
    }
    // 1 + 2 + 5 + 500 + 3 quantity steps at 0.5 kg each.
    assert_eq!(outcome.record.total_emissions, 255.5);
}

struct CannedOcr(&'static str);

impl TextExtractor for CannedOcr {
    fn extract_text(&self, _image: &[u8]) -> Result<String, CoreError> {
        Ok(self.0.to_string())
    }
}

struct BrokenOcr;

impl TextExtractor for BrokenOcr {
    fn extract_text(&self, _image: &[u8]) -> Result<String, CoreError> {
        Err(CoreError::Extraction("unreadable scan".into()))
    }
}

#[test]
fn bill_images_run_through_ocr_then_text_analysis() {
    let mut engine = seeded_engine(MemoryRecordStore::new());

    let result = engine
        .analyze_bill_image(&CannedOcr("scanned electricity bill, 240 kWh"), b"raw bytes")
        .expect("analysis");
    assert_eq!(result.bill_type, Category::Electricity);
    assert_eq!(result.detected_items.len(), 1);
    // Analysis alone writes nothing.
    assert!(engine.query_history(None).unwrap().is_empty());
}

#[test]
fn ocr_failures_propagate_unchanged() {
    let mut engine = seeded_engine(MemoryRecordStore::new());

    match engine.analyze_bill_image(&BrokenOcr, b"raw bytes") {
        Err(CoreError::Extraction(message)) => assert_eq!(message, "unreadable scan"),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn dashboard_summary_flags_estimates_only_when_empty() {
    let engine = seeded_engine(MemoryRecordStore::new());
    let summary = engine.dashboard_summary().unwrap();
    assert!(summary.is_estimated);
    assert_eq!(summary.daily, 0.0);
    assert_eq!(summary.highest_contributor, None);

    let store = MemoryRecordStore::new();
    store.append(&past_record(0, Category::Gas, 5.0)).unwrap();
    store.append(&past_record(2, Category::Gas, 7.0)).unwrap();
    let engine = seeded_engine(store);

    let summary = engine.dashboard_summary().unwrap();
    assert!(!summary.is_estimated);
    assert_eq!(summary.daily, 5.0);
    assert_eq!(summary.monthly, 12.0);
    assert_eq!(summary.highest_contributor, Some(Category::Gas));
    assert_eq!(summary.days_tracked, 2);
}

#[test]
fn trend_uses_the_latest_prior_record_in_category() {
    let store = MemoryRecordStore::new();
    store.append(&past_record(10, Category::Grocery, 20.0)).unwrap();
    store.append(&past_record(5, Category::Grocery, 18.0)).unwrap();
    store.append(&past_record(2, Category::Gas, 50.0)).unwrap();
    let engine = seeded_engine(store);

    let comparison = engine
        .trend_for(15.0, Category::Grocery)
        .unwrap()
        .expect("comparison");
    assert_eq!(comparison.status, TrendStatus::Improved);
    assert_eq!(comparison.difference, 3.0);

    assert!(engine.trend_for(15.0, Category::Electricity).unwrap().is_none());
}

#[test]
fn benchmark_status_uses_the_monthly_total() {
    let store = MemoryRecordStore::new();
    store.append(&past_record(1, Category::Gas, 200.0)).unwrap();
    store.append(&past_record(2, Category::Gas, 100.0)).unwrap();
    let engine = seeded_engine(store);

    // 300 kg this month: above 1.1 x 250 for an individual, below 0.9 x 950
    // for a family.
    assert_eq!(
        engine.benchmark_status(AccountType::Individual).unwrap(),
        BenchmarkStatus::Above
    );
    assert_eq!(
        engine.benchmark_status(AccountType::Family).unwrap(),
        BenchmarkStatus::Below
    );
}

#[test]
fn recent_months_respect_the_requested_span() {
    let store = MemoryRecordStore::new();
    store.append(&past_record(0, Category::Gas, 5.0)).unwrap();
    let engine = seeded_engine(store);

    let months = engine.recent_months(6).unwrap();
    assert_eq!(months.len(), 6);
    assert_eq!(months[5].total, 5.0);
    assert!(months[..5].iter().all(|bucket| bucket.total == 0.0));
}
