//! Comparison orchestrator: paired pipelined vs one-by-one benchmark runs.

use tracing::info;

use crate::executor::{CommandExecutor, StoreError};
use crate::harness::Harness;
use crate::schema::ComparisonReport;

/// Run both insert modes over an identical workload shape and compute
/// relative performance.
///
/// Clears both namespaces first so residual data cannot skew either run,
/// then runs the pipelined insert followed by the one-by-one insert. This
/// mutates store state in both namespaces as a byproduct; it is not a
/// read-only operation. Any failure while clearing or benchmarking aborts
/// the whole comparison, never yielding a partial report.
pub fn compare<E: CommandExecutor>(
    harness: &mut Harness<E>,
    n: usize,
) -> Result<ComparisonReport, StoreError> {
    harness.delete_pipelined(n)?;
    harness.clear_individual_namespace()?;

    let pipeline = harness.insert_pipelined(n)?;
    let normal = harness.insert_individual(n)?;

    let report = ComparisonReport::from_durations(pipeline.duration_ms, normal.duration_ms);
    info!(
        pipeline_duration_ms = report.pipeline_duration_ms,
        normal_duration_ms = report.normal_duration_ms,
        time_saved_ms = report.time_saved_ms,
        "performance comparison completed"
    );
    Ok(report)
}
