//! In-memory stand-in for a Redis connection, for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use redis::aio::ConnectionLike;
use redis::{Arg, Cmd, ErrorKind, Pipeline, RedisError, RedisFuture, Value};

#[derive(Debug, Default)]
struct State {
    entries: HashMap<Vec<u8>, (Vec<u8>, Option<u64>)>,
    commands: Vec<String>,
    error: Option<&'static str>,
}

/// Answers SETEX, GET, DEL and EXISTS from a shared in-memory map
///
/// Clones share state, so a test can keep one handle for assertions while
/// the code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeRedis {
    state: Arc<Mutex<State>>,
}

impl FakeRedis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following command fail with an I/O error
    pub fn fail_with(&self, message: &'static str) {
        self.state.lock().unwrap().error = Some(message);
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().error = None;
    }

    pub fn value_of(&self, key: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.entries.get(key.as_bytes()).map(|(value, _)| value.clone())
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        let state = self.state.lock().unwrap();
        state.entries.get(key.as_bytes()).and_then(|(_, ttl)| *ttl)
    }

    /// Lets `seconds` pass, dropping entries whose TTL runs out
    pub fn advance(&self, seconds: u64) {
        let mut state = self.state.lock().unwrap();
        state.entries.retain(|_, (_, ttl)| match ttl {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(seconds);
                *remaining > 0
            }
            None => true,
        });
    }

    /// Commands received so far, rendered as space separated text
    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().commands.clone()
    }

    fn execute(&self, cmd: &Cmd) -> Result<Value, RedisError> {
        let args: Vec<Vec<u8>> = cmd
            .args_iter()
            .filter_map(|arg| match arg {
                Arg::Simple(bytes) => Some(bytes.to_vec()),
                Arg::Cursor => None,
            })
            .collect();

        let mut state = self.state.lock().unwrap();
        state.commands.push(
            args.iter()
                .map(|arg| String::from_utf8_lossy(arg).into_owned())
                .collect::<Vec<_>>()
                .join(" "),
        );

        if let Some(message) = state.error {
            return Err(RedisError::from((ErrorKind::IoError, message)));
        }

        let name = args
            .first()
            .map(|name| String::from_utf8_lossy(name).to_uppercase())
            .unwrap_or_default();

        match (name.as_str(), args.as_slice()) {
            ("SETEX", [_, key, seconds, value]) => {
                let seconds = String::from_utf8_lossy(seconds).parse::<u64>().ok();
                state
                    .entries
                    .insert(key.clone(), (value.clone(), seconds));
                Ok(Value::Okay)
            }
            ("GET", [_, key]) => Ok(state
                .entries
                .get(key)
                .map(|(value, _)| Value::BulkString(value.clone()))
                .unwrap_or(Value::Nil)),
            ("DEL", [_, key]) => Ok(Value::Int(state.entries.remove(key).is_some() as i64)),
            ("EXISTS", [_, key]) => Ok(Value::Int(state.entries.contains_key(key) as i64)),
            _ => Err(RedisError::from((
                ErrorKind::ResponseError,
                "unsupported command",
            ))),
        }
    }
}

impl ConnectionLike for FakeRedis {
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        let result = self.execute(cmd);
        Box::pin(async move { result })
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        _pipeline: &'a Pipeline,
        _offset: usize,
        _count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        Box::pin(async move {
            Err(RedisError::from((
                ErrorKind::ResponseError,
                "pipelines are not supported",
            )))
        })
    }

    fn get_db(&self) -> i64 {
        0
    }
}
