//! Store command and reply vocabulary.
//!
//! Every operation the harness issues against the key-value store is
//! expressed as a [`Command`] value, so executors can run them one at a time
//! or buffer a whole sequence into a single pipelined dispatch.

use std::collections::HashMap;

/// A single key-value store command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write one hash field (`HSET key field value`).
    HSet {
        key: String,
        field: String,
        value: String,
    },
    /// Write a full set of hash fields in one command.
    HSetAll {
        key: String,
        fields: Vec<(String, String)>,
    },
    /// Set a key's time-to-live in seconds.
    Expire { key: String, ttl_secs: u64 },
    /// Read all fields of a hash.
    HGetAll { key: String },
    /// Delete a key.
    Del { key: String },
    /// Delete every key matching a glob pattern. Not pipelineable.
    DelMatching { pattern: String },
    /// Check whether a key exists.
    Exists { key: String },
    /// Number of keys in the current database.
    DbSize,
}

/// Reply produced by executing a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Simple status reply.
    Ok,
    Bool(bool),
    Int(i64),
    Hash(HashMap<String, String>),
}

impl Reply {
    /// Hash contents, if this reply carries one.
    pub fn as_hash(&self) -> Option<&HashMap<String, String>> {
        match self {
            Reply::Hash(h) => Some(h),
            _ => None,
        }
    }

    /// True for a hash reply with at least one field.
    pub fn is_present_hash(&self) -> bool {
        matches!(self, Reply::Hash(h) if !h.is_empty())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Reply::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Reply::Bool(b) => Some(*b),
            _ => None,
        }
    }
}
