//! Shared result types for benchmark runs and store introspection.
//!
//! These are the structured records returned by the harness and the
//! orchestrator. They serialize to the same JSON field names the façade
//! exposes, so library callers and route bodies stay in sync.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which benchmark operation produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "INSERT_PIPELINE")]
    InsertPipeline,
    #[serde(rename = "INSERT_NORMAL")]
    InsertNormal,
    #[serde(rename = "READ_PIPELINE")]
    ReadPipeline,
    #[serde(rename = "DELETE_PIPELINE")]
    DeletePipeline,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::InsertPipeline => "INSERT_PIPELINE",
            Operation::InsertNormal => "INSERT_NORMAL",
            Operation::ReadPipeline => "READ_PIPELINE",
            Operation::DeletePipeline => "DELETE_PIPELINE",
        }
    }
}

/// In-band status carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "ERROR")]
    Error,
}

/// Timing result of one harness invocation. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Operation kind that was measured.
    pub operation: Operation,
    /// Number of records the run covered.
    pub records: usize,
    /// Wall-clock duration in whole milliseconds, measured around command
    /// submission plus full-result drain.
    pub duration_ms: u64,
    pub status: Status,
    /// For reads: how many of the requested records were actually present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_count: Option<usize>,
}

impl BenchmarkRun {
    pub fn new(operation: Operation, records: usize, elapsed: Duration) -> Self {
        Self {
            operation,
            records,
            duration_ms: elapsed.as_millis() as u64,
            status: Status::Success,
            results_count: None,
        }
    }

    pub fn with_results_count(mut self, count: usize) -> Self {
        self.results_count = Some(count);
        self
    }
}

/// Relative performance of pipelined vs one-by-one insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub pipeline_duration_ms: u64,
    pub normal_duration_ms: u64,
    /// `normal / pipeline`; `None` when the pipelined run finished in 0 ms
    /// (the speedup is unbounded, not undefined).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement_factor: Option<f64>,
    /// Signed: negative if the pipelined run was somehow slower.
    pub time_saved_ms: i64,
}

impl ComparisonReport {
    pub fn from_durations(pipeline_duration_ms: u64, normal_duration_ms: u64) -> Self {
        let improvement_factor = if pipeline_duration_ms == 0 {
            None
        } else {
            Some(normal_duration_ms as f64 / pipeline_duration_ms as f64)
        };
        Self {
            pipeline_duration_ms,
            normal_duration_ms,
            improvement_factor,
            time_saved_ms: normal_duration_ms as i64 - pipeline_duration_ms as i64,
        }
    }

    /// Human-readable factor, e.g. `"12.40x faster"`, or `"infinite"` when
    /// the pipelined run measured 0 ms.
    pub fn performance_improvement(&self) -> String {
        match self.improvement_factor {
            Some(f) => format!("{:.2}x faster", f),
            None => "infinite".to_string(),
        }
    }
}

/// Snapshot of store-level facts for the info route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub database_size: i64,
    pub pipeline_user_exists: bool,
    pub normal_user_exists: bool,
}

/// A single record looked up by sequence id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFetch {
    pub key: String,
    pub data: HashMap<String, String>,
    pub exists: bool,
}
