//! Benchmark harness comparing pipelined vs one-by-one Redis command
//! issuance.
//!
//! The core is [`harness::Harness`]: given a record count and an operation
//! kind, it generates the command sequence, executes it either through
//! singular round trips or a single pipelined batch, and measures elapsed
//! wall-clock time. [`compare::compare`] runs both insert modes over an
//! identical workload and reports the relative speedup. [`facade::Facade`]
//! is the thin request/response boundary carrying the service's route table.
//!
//! Everything runs synchronously on the calling thread. Known limitation:
//! concurrent callers benchmarking overlapping key ranges race with each
//! other; no isolation is provided.

pub mod command;
pub mod compare;
pub mod executor;
pub mod facade;
pub mod harness;
pub mod memory;
pub mod redis_store;
pub mod schema;

pub use command::{Command, Reply};
pub use executor::{CommandExecutor, StoreError};
pub use facade::{Facade, Method};
pub use harness::Harness;
pub use memory::MemoryExecutor;
pub use redis_store::RedisExecutor;
pub use schema::{BenchmarkRun, ComparisonReport, Operation, Status};
