//! The batched-command executor contract and the store error taxonomy.
//!
//! The harness is written against [`CommandExecutor`] rather than any
//! concrete client, so the store backend is swappable: a live Redis
//! connection in production, an in-memory map in tests and benches.

use thiserror::Error;

use crate::command::{Command, Reply};

/// Errors surfaced by a store backend.
///
/// Harness and orchestrator propagate these as typed values; the request
/// façade is the single place they are flattened into in-band
/// `status: "ERROR"` response bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store command error: {0}")]
    Command(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// A store backend capable of singular and batched command issuance.
///
/// `execute_batch` submits the whole command sequence as one pipelined
/// round trip and blocks until every reply has been drained. Replies are
/// returned in command order. Neither method retries or times out; a hung
/// connection hangs the caller.
pub trait CommandExecutor {
    fn execute_single(&mut self, cmd: Command) -> Result<Reply, StoreError>;

    fn execute_batch(&mut self, cmds: Vec<Command>) -> Result<Vec<Reply>, StoreError>;
}
