//! Refresh requests
//!
//! The canonical keyword arguments a refresh task carries from the
//! dispatching process to a worker.

use super::task::TaskPayload;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Positional and keyword arguments for a constructor or a call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobArgs {
    /// Positional arguments
    #[serde(default)]
    pub args: Vec<Value>,
    /// Keyword arguments
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl JobArgs {
    /// Create empty arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg<V: Into<Value>>(mut self, value: V) -> Self {
        self.args.push(value.into());
        self
    }

    /// Add a keyword argument
    pub fn kwarg<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}

/// Everything a worker needs to rebuild a job and refresh one cached value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Dotted path of the job class
    pub klass_str: String,
    /// Positional constructor arguments
    #[serde(default)]
    pub obj_args: Vec<Value>,
    /// Keyword constructor arguments
    #[serde(default)]
    pub obj_kwargs: Map<String, Value>,
    /// Positional arguments of the refreshed call
    #[serde(default)]
    pub call_args: Vec<Value>,
    /// Keyword arguments of the refreshed call
    #[serde(default)]
    pub call_kwargs: Map<String, Value>,
}

impl RefreshRequest {
    /// Create a request for a job class with no arguments
    pub fn new<S: Into<String>>(klass_str: S) -> Self {
        Self {
            klass_str: klass_str.into(),
            obj_args: Vec::new(),
            obj_kwargs: Map::new(),
            call_args: Vec::new(),
            call_kwargs: Map::new(),
        }
    }

    /// Set the constructor arguments
    pub fn with_instance_args(mut self, args: JobArgs) -> Self {
        self.obj_args = args.args;
        self.obj_kwargs = args.kwargs;
        self
    }

    /// Set the call arguments
    pub fn with_call_args(mut self, args: JobArgs) -> Self {
        self.call_args = args.args;
        self.call_kwargs = args.kwargs;
        self
    }

    /// Constructor arguments as a [`JobArgs`]
    pub fn instance_args(&self) -> JobArgs {
        JobArgs {
            args: self.obj_args.clone(),
            kwargs: self.obj_kwargs.clone(),
        }
    }

    /// Call arguments as a [`JobArgs`]
    pub fn call_args(&self) -> JobArgs {
        JobArgs {
            args: self.call_args.clone(),
            kwargs: self.call_kwargs.clone(),
        }
    }

    /// Encode as the refresh entry point's keyword arguments
    pub fn to_payload(&self) -> Result<TaskPayload> {
        TaskPayload::from_value(serde_json::to_value(self)?)
    }

    /// Decode from the refresh entry point's keyword arguments
    pub fn from_payload(payload: &TaskPayload) -> Result<Self> {
        serde_json::from_value(Value::Object(payload.as_map().clone())).map_err(|e| {
            Error::invalid_argument(format!("Malformed refresh payload: {e}"))
        })
    }
}
