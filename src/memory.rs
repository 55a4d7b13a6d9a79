//! In-memory store backend with dispatch counters.
//!
//! Second backend behind [`CommandExecutor`], used by tests and criterion
//! benches where a live Redis is unavailable or unwanted. TTLs are recorded
//! but never enforced; counters make the harness's dispatch behavior
//! observable (how many single round trips, how many batches, how many
//! commands rode inside them).

use std::collections::HashMap;

use crate::command::{Command, Reply};
use crate::executor::{CommandExecutor, StoreError};

#[derive(Debug, Default)]
pub struct MemoryExecutor {
    data: HashMap<String, HashMap<String, String>>,
    ttls: HashMap<String, u64>,
    /// Number of `execute_single` calls.
    pub single_dispatches: usize,
    /// Number of `execute_batch` calls (empty batches are never dispatched
    /// by the harness, but would still count here).
    pub batch_dispatches: usize,
    /// Total commands carried inside batches.
    pub batched_commands: usize,
    failure: Option<String>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent dispatch fail with a command error.
    pub fn fail_with(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// TTL recorded for a key by the last `Expire`, if any.
    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.ttls.get(key).copied()
    }

    pub fn reset_counters(&mut self) {
        self.single_dispatches = 0;
        self.batch_dispatches = 0;
        self.batched_commands = 0;
    }

    fn apply(&mut self, cmd: Command) -> Result<Reply, StoreError> {
        match cmd {
            Command::HSet { key, field, value } => {
                let hash = self.data.entry(key).or_default();
                let added = !hash.contains_key(&field);
                hash.insert(field, value);
                Ok(Reply::Int(added as i64))
            }
            Command::HSetAll { key, fields } => {
                let hash = self.data.entry(key).or_default();
                for (field, value) in fields {
                    hash.insert(field, value);
                }
                Ok(Reply::Ok)
            }
            Command::Expire { key, ttl_secs } => {
                if self.data.contains_key(&key) {
                    self.ttls.insert(key, ttl_secs);
                    Ok(Reply::Bool(true))
                } else {
                    Ok(Reply::Bool(false))
                }
            }
            Command::HGetAll { key } => Ok(Reply::Hash(
                self.data.get(&key).cloned().unwrap_or_default(),
            )),
            Command::Del { key } => {
                self.ttls.remove(&key);
                Ok(Reply::Int(self.data.remove(&key).is_some() as i64))
            }
            Command::DelMatching { pattern } => {
                let prefix = pattern.strip_suffix('*').unwrap_or(&pattern).to_string();
                let victims: Vec<String> = self
                    .data
                    .keys()
                    .filter(|k| k.starts_with(&prefix))
                    .cloned()
                    .collect();
                for key in &victims {
                    self.data.remove(key);
                    self.ttls.remove(key);
                }
                Ok(Reply::Int(victims.len() as i64))
            }
            Command::Exists { key } => Ok(Reply::Bool(self.data.contains_key(&key))),
            Command::DbSize => Ok(Reply::Int(self.data.len() as i64)),
        }
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(msg) => Err(StoreError::Command(msg.clone())),
            None => Ok(()),
        }
    }
}

impl CommandExecutor for MemoryExecutor {
    fn execute_single(&mut self, cmd: Command) -> Result<Reply, StoreError> {
        self.check_failure()?;
        self.single_dispatches += 1;
        self.apply(cmd)
    }

    fn execute_batch(&mut self, cmds: Vec<Command>) -> Result<Vec<Reply>, StoreError> {
        self.check_failure()?;
        self.batch_dispatches += 1;
        self.batched_commands += cmds.len();
        cmds.into_iter().map(|cmd| self.apply(cmd)).collect()
    }
}
