//! Request façade: the `(method, path)` routing table.
//!
//! Translates external requests into harness invocations and harness
//! results into JSON bodies. Every known route always yields a body; store
//! failures are reported in-band through a `status: "ERROR"` field plus an
//! `error` message, never through transport-level signaling. Unknown routes
//! yield `None` and are the transport's 404 concern.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};
use tracing::{error, info};

use crate::compare::compare;
use crate::executor::{CommandExecutor, StoreError};
use crate::harness::Harness;
use crate::schema::BenchmarkRun;

pub const SERVICE_NAME: &str = "redis-pipeline-bench";

/// Default workload size for the benchmark routes.
pub const DEFAULT_RECORDS: usize = 10_000;

const USER_ROUTE_PREFIX: &str = "/api/redis/user/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Routes requests onto a harness with a fixed per-run record count.
pub struct Facade<E> {
    harness: Harness<E>,
    records: usize,
}

impl<E: CommandExecutor> Facade<E> {
    pub fn new(harness: Harness<E>) -> Self {
        Self::with_records(harness, DEFAULT_RECORDS)
    }

    pub fn with_records(harness: Harness<E>, records: usize) -> Self {
        Self { harness, records }
    }

    /// Dispatch one request. `None` means no such route.
    pub fn handle(&mut self, method: Method, path: &str) -> Option<Value> {
        match (method, path) {
            (Method::Post, "/api/redis/pipeline/insert") => {
                info!(records = self.records, "starting pipeline insert");
                Some(run_body(self.harness.insert_pipelined(self.records)))
            }
            (Method::Post, "/api/redis/normal/insert") => {
                info!(records = self.records, "starting normal insert");
                Some(run_body(self.harness.insert_individual(self.records)))
            }
            (Method::Get, "/api/redis/pipeline/read") => {
                info!(records = self.records, "starting pipeline read");
                Some(run_body(self.harness.read_pipelined(self.records)))
            }
            (Method::Delete, "/api/redis/pipeline/delete") => {
                info!(records = self.records, "starting pipeline delete");
                Some(run_body(self.harness.delete_pipelined(self.records)))
            }
            (Method::Get, "/api/redis/info") => Some(self.info_body()),
            (Method::Post, "/api/redis/performance/compare") => Some(self.compare_body()),
            (Method::Get, "/api/redis/health") => Some(health_body()),
            (Method::Get, p) if p.starts_with(USER_ROUTE_PREFIX) => {
                Some(self.user_body(&p[USER_ROUTE_PREFIX.len()..]))
            }
            _ => None,
        }
    }

    fn info_body(&mut self) -> Value {
        match self.harness.store_info() {
            Ok(info) => json!({
                "database_size": info.database_size,
                "pipeline_user_exists": info.pipeline_user_exists,
                "normal_user_exists": info.normal_user_exists,
                "status": "SUCCESS",
            }),
            Err(e) => error_body(&e),
        }
    }

    fn compare_body(&mut self) -> Value {
        match compare(&mut self.harness, self.records) {
            Ok(report) => json!({
                "pipeline_duration_ms": report.pipeline_duration_ms,
                "normal_duration_ms": report.normal_duration_ms,
                "performance_improvement": report.performance_improvement(),
                "time_saved_ms": report.time_saved_ms,
                "status": "SUCCESS",
            }),
            Err(e) => error_body(&e),
        }
    }

    fn user_body(&mut self, raw_id: &str) -> Value {
        let id: u64 = match raw_id.parse() {
            Ok(id) => id,
            Err(_) => {
                return error_body(&StoreError::InvalidArgument(format!(
                    "user id must be an integer, got {:?}",
                    raw_id
                )))
            }
        };
        match self.harness.fetch_user(id) {
            Ok(user) => json!({
                "key": user.key,
                "data": user.data,
                "exists": user.exists,
                "status": "SUCCESS",
            }),
            Err(e) => error_body(&e),
        }
    }
}

fn run_body(result: Result<BenchmarkRun, StoreError>) -> Value {
    match result {
        Ok(run) => {
            let mut body = json!({
                "operation": run.operation.label(),
                "records": run.records,
                "duration_ms": run.duration_ms,
                "status": "SUCCESS",
            });
            if let Some(count) = run.results_count {
                body["results_count"] = json!(count);
            }
            body
        }
        Err(e) => error_body(&e),
    }
}

fn error_body(e: &StoreError) -> Value {
    error!(error = %e, "request failed");
    json!({
        "status": "ERROR",
        "error": e.to_string(),
    })
}

fn health_body() -> Value {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    json!({
        "status": "UP",
        "service": SERVICE_NAME,
        "timestamp": millis.to_string(),
    })
}
