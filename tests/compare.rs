//! Comparison orchestrator tests.

mod common;

use common::fresh_harness;
use redis_pipeline_bench::compare::compare;
use redis_pipeline_bench::schema::ComparisonReport;

#[test]
fn compare_succeeds_against_reachable_store() {
    let mut harness = fresh_harness();
    let report = compare(&mut harness, 50).unwrap();

    assert_eq!(
        report.time_saved_ms,
        report.normal_duration_ms as i64 - report.pipeline_duration_ms as i64
    );
    if let Some(factor) = report.improvement_factor {
        assert!(factor.is_finite() && factor >= 0.0);
    }
    // both workloads actually landed in the store
    assert_eq!(harness.executor().len(), 100);
}

#[test]
fn compare_clears_residual_individual_keys() {
    let mut harness = fresh_harness();
    harness.insert_individual(5).unwrap();

    compare(&mut harness, 2).unwrap();

    // residual normal_user:3..5 must be gone, not just overwritten
    let user3 = harness.executor().ttl_of("normal_user:3");
    assert_eq!(user3, None);
    assert_eq!(harness.executor().len(), 4, "2 keys per namespace after compare(2)");
}

#[test]
fn compare_aborts_on_store_failure() {
    let mut harness = fresh_harness();
    harness.executor_mut().fail_with("store down");

    let err = compare(&mut harness, 10).unwrap_err();
    assert!(err.to_string().contains("store down"));
    assert!(harness.executor().is_empty(), "no partial comparison side effects");
}

// =============================================================================
// Report math
// =============================================================================

#[test]
fn improvement_factor_divides_normal_by_pipeline() {
    let report = ComparisonReport::from_durations(10, 40);
    assert_eq!(report.improvement_factor, Some(4.0));
    assert_eq!(report.time_saved_ms, 30);
    assert_eq!(report.performance_improvement(), "4.00x faster");
}

#[test]
fn zero_pipeline_duration_is_reported_as_infinite() {
    let report = ComparisonReport::from_durations(0, 17);
    assert_eq!(report.improvement_factor, None);
    assert_eq!(report.time_saved_ms, 17);
    assert_eq!(report.performance_improvement(), "infinite");
}

#[test]
fn slower_pipeline_yields_negative_time_saved() {
    let report = ComparisonReport::from_durations(40, 10);
    assert_eq!(report.improvement_factor, Some(0.25));
    assert_eq!(report.time_saved_ms, -30);
}
