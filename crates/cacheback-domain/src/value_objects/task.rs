//! Task payloads, options and receipts
//!
//! Payloads and options are JSON objects forwarded verbatim to whichever task
//! queue backend is active; this crate never interprets their keys beyond
//! the typed accessors below.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keyword arguments for the refresh entry point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskPayload(Map<String, Value>);

impl TaskPayload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::invalid_argument(format!(
                "Task payload must be a JSON object, got {other}"
            ))),
        }
    }

    /// Add a keyword argument
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a keyword argument
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of keyword arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload carries no arguments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for TaskPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Queue, routing and submission options supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskOptions(Map<String, Value>);

impl TaskOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a raw option value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a string option
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Look up an unsigned integer option
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    /// Whether no option was supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for TaskOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Receipt returned once a backend accepted a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnqueuedTask {
    /// Backend-assigned task identifier
    pub id: String,
    /// Backend identifier (`"redis"`, `"nats"`, ...)
    pub backend: String,
    /// Queue, subject or routing destination the task was sent to
    pub queue: String,
    /// When the backend accepted the task
    pub enqueued_at: DateTime<Utc>,
}

impl EnqueuedTask {
    /// Create a receipt stamped with the current time
    pub fn new<I, B, Q>(id: I, backend: B, queue: Q) -> Self
    where
        I: Into<String>,
        B: Into<String>,
        Q: Into<String>,
    {
        Self {
            id: id.into(),
            backend: backend.into(),
            queue: queue.into(),
            enqueued_at: Utc::now(),
        }
    }
}
