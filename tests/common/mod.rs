//! Shared test helpers.

#![allow(dead_code)]

use redis_pipeline_bench::harness::Harness;
use redis_pipeline_bench::memory::MemoryExecutor;

/// Harness over an empty in-memory store.
pub fn fresh_harness() -> Harness<MemoryExecutor> {
    Harness::new(MemoryExecutor::new())
}

/// Harness with `n` records already in the pipelined namespace and
/// dispatch counters reset.
pub fn seeded_harness(n: usize) -> Harness<MemoryExecutor> {
    let mut harness = fresh_harness();
    harness.insert_pipelined(n).expect("seed insert failed");
    harness.executor_mut().reset_counters();
    harness
}
