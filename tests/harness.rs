//! Benchmark harness dispatch and workload-shape tests.
//!
//! Runs against the in-memory backend, whose counters expose exactly how
//! many singular round trips and batch dispatches each operation issued.

mod common;

use common::{fresh_harness, seeded_harness};
use redis_pipeline_bench::harness::{individual_key, pipeline_key, Record, DEFAULT_TTL_SECS};
use redis_pipeline_bench::schema::{Operation, Status};

// =============================================================================
// Dispatch-count properties
// =============================================================================

#[test]
fn pipelined_insert_issues_five_commands_per_record_in_one_batch() {
    let mut harness = fresh_harness();
    let run = harness.insert_pipelined(100).unwrap();

    assert_eq!(run.operation, Operation::InsertPipeline);
    assert_eq!(run.records, 100);
    assert_eq!(run.status, Status::Success);

    let exec = harness.executor();
    assert_eq!(exec.batch_dispatches, 1, "expected a single batch dispatch");
    assert_eq!(exec.batched_commands, 500, "4 field writes + 1 expire per record");
    assert_eq!(exec.single_dispatches, 0);
}

#[test]
fn individual_insert_issues_two_round_trips_per_record() {
    let mut harness = fresh_harness();
    let run = harness.insert_individual(100).unwrap();

    assert_eq!(run.operation, Operation::InsertNormal);
    let exec = harness.executor();
    assert_eq!(exec.single_dispatches, 200, "write-all-fields + expire per record");
    assert_eq!(exec.batch_dispatches, 0);
}

#[test]
fn read_and_delete_are_single_batches() {
    let mut harness = seeded_harness(50);

    harness.read_pipelined(50).unwrap();
    harness.delete_pipelined(50).unwrap();

    let exec = harness.executor();
    assert_eq!(exec.batch_dispatches, 2);
    assert_eq!(exec.batched_commands, 100);
    assert_eq!(exec.single_dispatches, 0);
}

// =============================================================================
// Empty workloads
// =============================================================================

#[test]
fn zero_records_completes_without_dispatching() {
    let mut harness = fresh_harness();

    let insert = harness.insert_pipelined(0).unwrap();
    let normal = harness.insert_individual(0).unwrap();
    let read = harness.read_pipelined(0).unwrap();
    let delete = harness.delete_pipelined(0).unwrap();

    for run in [&insert, &normal, &read, &delete] {
        assert_eq!(run.records, 0);
        assert_eq!(run.status, Status::Success);
        assert!(run.duration_ms < 10, "n = 0 should be near-instant");
    }
    assert_eq!(read.results_count, Some(0));

    let exec = harness.executor();
    assert_eq!(exec.single_dispatches, 0);
    assert_eq!(exec.batch_dispatches, 0);
    assert!(exec.is_empty(), "no partial side effects for n = 0");
}

// =============================================================================
// Round-trip behavior
// =============================================================================

#[test]
fn read_after_delete_reports_absent_records() {
    let mut harness = seeded_harness(5);

    let before = harness.read_pipelined(5).unwrap();
    assert_eq!(before.results_count, Some(5));

    harness.delete_pipelined(5).unwrap();

    let after = harness.read_pipelined(5).unwrap();
    assert_eq!(after.results_count, Some(0), "deleted records must read back absent");
    assert!(harness.executor().is_empty());
}

#[test]
fn inserted_records_carry_derived_ages() {
    let mut harness = fresh_harness();
    harness.insert_pipelined(3).unwrap();

    let read = harness.read_pipelined(3).unwrap();
    assert_eq!(read.results_count, Some(3));

    for i in 1..=3u64 {
        let user = harness.fetch_user(i).unwrap();
        let expected_age = 20 + (i % 50);
        assert_eq!(
            user.data.get("age").map(String::as_str),
            Some(expected_age.to_string().as_str()),
            "age mismatch for user {}",
            i
        );
    }
}

#[test]
fn sample_user_after_bulk_insert() {
    let mut harness = fresh_harness();
    harness.insert_pipelined(10_000).unwrap();

    let user = harness.fetch_user(1).unwrap();
    assert!(user.exists);
    assert_eq!(user.key, "user:1");
    assert_eq!(user.data.get("id").map(String::as_str), Some("1"));
    assert_eq!(user.data.get("name").map(String::as_str), Some("User 1"));
    assert_eq!(
        user.data.get("email").map(String::as_str),
        Some("user1@example.com")
    );
}

#[test]
fn missing_user_reads_back_empty() {
    let mut harness = fresh_harness();
    let user = harness.fetch_user(42).unwrap();
    assert!(!user.exists);
    assert!(user.data.is_empty());
}

#[test]
fn reinsert_overwrites_without_accumulating_state() {
    let mut harness = fresh_harness();
    harness.insert_pipelined(10).unwrap();
    harness.insert_pipelined(10).unwrap();

    assert_eq!(harness.executor().len(), 10, "reruns must overwrite, not accumulate");
    let user = harness.fetch_user(10).unwrap();
    assert_eq!(user.data.len(), 4, "exactly the four record fields");
}

#[test]
fn both_modes_set_key_expirations() {
    let mut harness = fresh_harness();
    harness.insert_pipelined(2).unwrap();
    harness.insert_individual(2).unwrap();

    let exec = harness.executor();
    assert_eq!(exec.ttl_of(&pipeline_key(1)), Some(DEFAULT_TTL_SECS));
    assert_eq!(exec.ttl_of(&individual_key(2)), Some(DEFAULT_TTL_SECS));
}

// =============================================================================
// Introspection and failure propagation
// =============================================================================

#[test]
fn store_info_reflects_both_namespaces() {
    let mut harness = fresh_harness();

    let empty = harness.store_info().unwrap();
    assert_eq!(empty.database_size, 0);
    assert!(!empty.pipeline_user_exists);
    assert!(!empty.normal_user_exists);

    harness.insert_pipelined(3).unwrap();
    harness.insert_individual(2).unwrap();

    let info = harness.store_info().unwrap();
    assert_eq!(info.database_size, 5);
    assert!(info.pipeline_user_exists);
    assert!(info.normal_user_exists);
}

#[test]
fn store_failures_propagate_as_typed_errors() {
    let mut harness = fresh_harness();
    harness.executor_mut().fail_with("connection reset");

    let err = harness.insert_pipelined(10).unwrap_err();
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn record_fields_follow_sequence_index() {
    let record = Record::new(7);
    assert_eq!(record.id, 7);
    assert_eq!(record.name, "User 7");
    assert_eq!(record.email, "user7@example.com");
    assert_eq!(record.age, 27);

    // age wraps every 50 indices
    assert_eq!(Record::new(50).age, 20);
    assert_eq!(Record::new(51).age, 21);
}
