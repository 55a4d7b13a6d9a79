//! Benchmark harness: issue N store operations either one-by-one or as a
//! single pipelined batch, and report wall-clock duration.
//!
//! Every operation runs to completion on the calling thread; the batch is
//! dispatched and drained synchronously. Timing uses a monotonic clock
//! ([`Instant`]) and covers command buffering, submission and the full
//! result drain, never connection setup.

use std::time::Instant;

use tracing::info;

use crate::command::Command;
use crate::executor::{CommandExecutor, StoreError};
use crate::schema::{BenchmarkRun, Operation, StoreInfo, UserFetch};

/// Key prefix for records written by the pipelined path.
pub const PIPELINE_NS: &str = "user:";
/// Key prefix for records written by the one-by-one path.
pub const INDIVIDUAL_NS: &str = "normal_user:";

/// Default time-to-live applied to every inserted key.
pub const DEFAULT_TTL_SECS: u64 = 3600;

pub fn pipeline_key(i: usize) -> String {
    format!("{}{}", PIPELINE_NS, i)
}

pub fn individual_key(i: usize) -> String {
    format!("{}{}", INDIVIDUAL_NS, i)
}

/// Synthetic user record derived from a sequence index.
///
/// Both execution modes generate identical field content so the compared
/// workloads are equivalent in shape and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: usize,
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl Record {
    pub fn new(i: usize) -> Self {
        Self {
            id: i,
            name: format!("User {}", i),
            email: format!("user{}@example.com", i),
            age: 20 + (i % 50) as u32,
        }
    }

    /// Field name/value pairs as written to the store hash.
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("id".to_string(), self.id.to_string()),
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("age".to_string(), self.age.to_string()),
        ]
    }
}

/// Runs fixed-size batches of store operations against a [`CommandExecutor`].
///
/// The harness holds no state besides the executor and the insert TTL;
/// concurrent harnesses sharing overlapping key ranges will race, and no
/// isolation is provided.
pub struct Harness<E> {
    exec: E,
    ttl_secs: u64,
}

impl<E: CommandExecutor> Harness<E> {
    pub fn new(exec: E) -> Self {
        Self::with_ttl(exec, DEFAULT_TTL_SECS)
    }

    pub fn with_ttl(exec: E, ttl_secs: u64) -> Self {
        Self { exec, ttl_secs }
    }

    pub fn executor(&self) -> &E {
        &self.exec
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.exec
    }

    pub fn into_inner(self) -> E {
        self.exec
    }

    /// Insert `n` records through a single pipelined batch.
    ///
    /// Buffers `n x 5` commands (four field writes plus one expiration per
    /// record) and submits them in at most one batch dispatch; `n = 0`
    /// submits nothing. Re-running over the same range overwrites every
    /// field, leaving no stale state behind.
    pub fn insert_pipelined(&mut self, n: usize) -> Result<BenchmarkRun, StoreError> {
        let start = Instant::now();

        let mut cmds = Vec::with_capacity(n * 5);
        for i in 1..=n {
            let key = pipeline_key(i);
            let record = Record::new(i);
            for (field, value) in record.fields() {
                cmds.push(Command::HSet {
                    key: key.clone(),
                    field,
                    value,
                });
            }
            cmds.push(Command::Expire {
                key,
                ttl_secs: self.ttl_secs,
            });
        }
        if !cmds.is_empty() {
            self.exec.execute_batch(cmds)?;
        }

        let run = BenchmarkRun::new(Operation::InsertPipeline, n, start.elapsed());
        info!(
            records = n,
            duration_ms = run.duration_ms,
            "pipeline insert completed"
        );
        Ok(run)
    }

    /// Insert `n` records one command at a time.
    ///
    /// Each record costs two round trips (one write-all-fields command, one
    /// expiration), `2n` in total, versus the single round trip of
    /// [`Harness::insert_pipelined`].
    pub fn insert_individual(&mut self, n: usize) -> Result<BenchmarkRun, StoreError> {
        let start = Instant::now();

        for i in 1..=n {
            let key = individual_key(i);
            self.exec.execute_single(Command::HSetAll {
                key: key.clone(),
                fields: Record::new(i).fields(),
            })?;
            self.exec.execute_single(Command::Expire {
                key,
                ttl_secs: self.ttl_secs,
            })?;
        }

        let run = BenchmarkRun::new(Operation::InsertNormal, n, start.elapsed());
        info!(
            records = n,
            duration_ms = run.duration_ms,
            "normal insert completed"
        );
        Ok(run)
    }

    /// Read `n` records from the pipelined namespace in one batch.
    ///
    /// `results_count` counts the records actually present (non-empty hash
    /// replies), so a read after a delete reports absence.
    pub fn read_pipelined(&mut self, n: usize) -> Result<BenchmarkRun, StoreError> {
        let start = Instant::now();

        let cmds: Vec<Command> = (1..=n)
            .map(|i| Command::HGetAll {
                key: pipeline_key(i),
            })
            .collect();
        let replies = if cmds.is_empty() {
            Vec::new()
        } else {
            self.exec.execute_batch(cmds)?
        };
        let present = replies.iter().filter(|r| r.is_present_hash()).count();

        let run =
            BenchmarkRun::new(Operation::ReadPipeline, n, start.elapsed()).with_results_count(present);
        info!(
            records = n,
            duration_ms = run.duration_ms,
            results_count = present,
            "pipeline read completed"
        );
        Ok(run)
    }

    /// Delete `n` keys from the pipelined namespace in one batch.
    pub fn delete_pipelined(&mut self, n: usize) -> Result<BenchmarkRun, StoreError> {
        let start = Instant::now();

        let cmds: Vec<Command> = (1..=n)
            .map(|i| Command::Del {
                key: pipeline_key(i),
            })
            .collect();
        if !cmds.is_empty() {
            self.exec.execute_batch(cmds)?;
        }

        let run = BenchmarkRun::new(Operation::DeletePipeline, n, start.elapsed());
        info!(
            records = n,
            duration_ms = run.duration_ms,
            "pipeline delete completed"
        );
        Ok(run)
    }

    /// Remove every key in the one-by-one namespace, regardless of count.
    pub fn clear_individual_namespace(&mut self) -> Result<(), StoreError> {
        self.exec.execute_single(Command::DelMatching {
            pattern: format!("{}*", INDIVIDUAL_NS),
        })?;
        Ok(())
    }

    /// Store-level introspection for the info route. Not timed.
    pub fn store_info(&mut self) -> Result<StoreInfo, StoreError> {
        let database_size = self
            .exec
            .execute_single(Command::DbSize)?
            .as_int()
            .unwrap_or(0);
        let pipeline_user_exists = self
            .exec
            .execute_single(Command::Exists {
                key: pipeline_key(1),
            })?
            .as_bool()
            .unwrap_or(false);
        let normal_user_exists = self
            .exec
            .execute_single(Command::Exists {
                key: individual_key(1),
            })?
            .as_bool()
            .unwrap_or(false);
        Ok(StoreInfo {
            database_size,
            pipeline_user_exists,
            normal_user_exists,
        })
    }

    /// Fetch one record from the pipelined namespace by sequence id.
    pub fn fetch_user(&mut self, id: u64) -> Result<UserFetch, StoreError> {
        let key = format!("{}{}", PIPELINE_NS, id);
        let reply = self.exec.execute_single(Command::HGetAll { key: key.clone() })?;
        let data = reply.as_hash().cloned().unwrap_or_default();
        let exists = !data.is_empty();
        Ok(UserFetch { key, data, exists })
    }
}
