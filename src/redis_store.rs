//! Redis store backend.
//!
//! Wraps a synchronous `redis` connection behind [`CommandExecutor`].
//! Singular commands go through one typed round trip each; batches are
//! buffered into `redis::pipe()` and dispatched as a single pipelined round
//! trip, with replies decoded back into [`Reply`] values in command order.

use std::collections::HashMap;

use redis::Commands;

use crate::command::{Command, Reply};
use crate::executor::{CommandExecutor, StoreError};

pub struct RedisExecutor {
    con: redis::Connection,
}

impl RedisExecutor {
    /// Open a blocking connection, e.g. `redis://127.0.0.1:6379/`.
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let con = client
            .get_connection()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { con })
    }

    pub fn from_connection(con: redis::Connection) -> Self {
        Self { con }
    }

    fn del_matching(&mut self, pattern: &str) -> Result<Reply, StoreError> {
        // SCAN holds the connection borrow, so collect before deleting.
        let keys: Vec<String> = {
            let iter = self
                .con
                .scan_match::<_, String>(pattern)
                .map_err(classify)?;
            iter.collect()
        };
        if keys.is_empty() {
            return Ok(Reply::Int(0));
        }
        let removed: i64 = self.con.del(&keys).map_err(classify)?;
        Ok(Reply::Int(removed))
    }
}

fn classify(e: redis::RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Command(e.to_string())
    }
}

/// Decode one raw pipeline reply according to the command that produced it.
fn decode(cmd: &Command, value: redis::Value) -> Result<Reply, StoreError> {
    match cmd {
        Command::HSet { .. } | Command::Del { .. } => {
            let n: i64 = redis::from_redis_value(&value).map_err(classify)?;
            Ok(Reply::Int(n))
        }
        Command::HSetAll { .. } => {
            redis::from_redis_value::<()>(&value).map_err(classify)?;
            Ok(Reply::Ok)
        }
        Command::Expire { .. } => {
            let n: i64 = redis::from_redis_value(&value).map_err(classify)?;
            Ok(Reply::Bool(n != 0))
        }
        Command::HGetAll { .. } => {
            let map: HashMap<String, String> =
                redis::from_redis_value(&value).map_err(classify)?;
            Ok(Reply::Hash(map))
        }
        other => Err(StoreError::Command(format!(
            "{:?} cannot appear in a pipeline",
            other
        ))),
    }
}

impl CommandExecutor for RedisExecutor {
    fn execute_single(&mut self, cmd: Command) -> Result<Reply, StoreError> {
        match cmd {
            Command::HSet { key, field, value } => {
                let added: i64 = self.con.hset(key, field, value).map_err(classify)?;
                Ok(Reply::Int(added))
            }
            Command::HSetAll { key, fields } => {
                self.con
                    .hset_multiple::<_, _, _, ()>(key, &fields)
                    .map_err(classify)?;
                Ok(Reply::Ok)
            }
            Command::Expire { key, ttl_secs } => {
                let set: i64 = self.con.expire(key, ttl_secs as i64).map_err(classify)?;
                Ok(Reply::Bool(set != 0))
            }
            Command::HGetAll { key } => {
                let map: HashMap<String, String> = self.con.hgetall(key).map_err(classify)?;
                Ok(Reply::Hash(map))
            }
            Command::Del { key } => {
                let removed: i64 = self.con.del(key).map_err(classify)?;
                Ok(Reply::Int(removed))
            }
            Command::DelMatching { pattern } => self.del_matching(&pattern),
            Command::Exists { key } => {
                let exists: bool = self.con.exists(key).map_err(classify)?;
                Ok(Reply::Bool(exists))
            }
            Command::DbSize => {
                let size: i64 = redis::cmd("DBSIZE").query(&mut self.con).map_err(classify)?;
                Ok(Reply::Int(size))
            }
        }
    }

    fn execute_batch(&mut self, cmds: Vec<Command>) -> Result<Vec<Reply>, StoreError> {
        if cmds.is_empty() {
            return Ok(Vec::new());
        }
        let mut pipe = redis::pipe();
        for cmd in &cmds {
            match cmd {
                Command::HSet { key, field, value } => {
                    pipe.hset(key, field, value);
                }
                Command::HSetAll { key, fields } => {
                    pipe.hset_multiple(key, fields);
                }
                Command::Expire { key, ttl_secs } => {
                    pipe.expire(key, *ttl_secs as i64);
                }
                Command::HGetAll { key } => {
                    pipe.hgetall(key);
                }
                Command::Del { key } => {
                    pipe.del(key);
                }
                other => {
                    return Err(StoreError::Command(format!(
                        "{:?} cannot appear in a pipeline",
                        other
                    )))
                }
            }
        }
        let raw: Vec<redis::Value> = pipe.query(&mut self.con).map_err(classify)?;
        cmds.iter()
            .zip(raw)
            .map(|(cmd, value)| decode(cmd, value))
            .collect()
    }
}
