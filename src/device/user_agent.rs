//! Raw user-agent input as delivered by the request header accessor
//!
//! Hosts hand over the header in whatever shape their HTTP layer produced:
//! a plain string, a list of fragments, or an object that knows how to
//! render itself. Everything else is rejected.

use std::fmt;
use std::sync::Arc;

use crate::errors::{CaptureError, Result};

const UNDETECTABLE: &str = "Unable to detect user agent.";

#[derive(Clone)]
pub enum RawUserAgent {
    Text(String),
    /// Joined with a single space, in order
    Fragments(Vec<String>),
    /// Rendered through its `Display` implementation
    Stringable(Arc<dyn fmt::Display + Send + Sync>),
    /// Any other shape; carries a short description for the log line
    Unsupported(String),
}

impl RawUserAgent {
    pub fn stringable<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        RawUserAgent::Stringable(Arc::new(value))
    }

    /// Collapse the input into the single string handed to the detector
    pub fn normalize(&self) -> Result<String> {
        match self {
            RawUserAgent::Text(s) => Ok(s.clone()),
            RawUserAgent::Fragments(parts) => Ok(parts.join(" ")),
            RawUserAgent::Stringable(value) => Ok(value.to_string()),
            RawUserAgent::Unsupported(shape) => Err(CaptureError::invalid_user_agent(format!(
                "{} (got {})",
                UNDETECTABLE, shape
            ))),
        }
    }
}

impl fmt::Debug for RawUserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawUserAgent::Text(s) => f.debug_tuple("Text").field(s).finish(),
            RawUserAgent::Fragments(parts) => f.debug_tuple("Fragments").field(parts).finish(),
            RawUserAgent::Stringable(value) => {
                f.debug_tuple("Stringable").field(&value.to_string()).finish()
            }
            RawUserAgent::Unsupported(shape) => f.debug_tuple("Unsupported").field(shape).finish(),
        }
    }
}

impl From<&str> for RawUserAgent {
    fn from(value: &str) -> Self {
        RawUserAgent::Text(value.to_string())
    }
}

impl From<String> for RawUserAgent {
    fn from(value: String) -> Self {
        RawUserAgent::Text(value)
    }
}

impl From<Vec<String>> for RawUserAgent {
    fn from(value: Vec<String>) -> Self {
        RawUserAgent::Fragments(value)
    }
}

impl From<Vec<&str>> for RawUserAgent {
    fn from(value: Vec<&str>) -> Self {
        RawUserAgent::Fragments(value.into_iter().map(str::to_string).collect())
    }
}

/// Header values that arrived through a JSON payload (event queues, webhooks)
impl From<serde_json::Value> for RawUserAgent {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(s) => RawUserAgent::Text(s),
            Value::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => parts.push(s),
                        Value::Number(n) => parts.push(n.to_string()),
                        Value::Bool(b) => parts.push(b.to_string()),
                        other => {
                            return RawUserAgent::Unsupported(format!(
                                "array containing {}",
                                json_kind(&other)
                            ));
                        }
                    }
                }
                RawUserAgent::Fragments(parts)
            }
            other => RawUserAgent::Unsupported(json_kind(&other).to_string()),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
