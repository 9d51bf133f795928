//! Run attributes and timing.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Attributes describing one extraction run, attached to its events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSpanAttributes {
    /// `block` or `page`.
    pub scope: String,
    /// The block id or page name the run was triggered on.
    pub target: String,
    /// The expression in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
}

impl RunSpanAttributes {
    /// Creates attributes for a scope and target.
    #[must_use]
    pub fn new(scope: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            target: target.into(),
            expr: None,
        }
    }

    /// Builds an event payload from these attributes plus `extra` fields.
    #[must_use]
    pub fn payload(&self, extra: serde_json::Value) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "scope": self.scope,
            "target": self.target,
        });
        if let Some(expr) = &self.expr {
            payload["expr"] = serde_json::json!(expr);
        }
        if let (Some(base), serde_json::Value::Object(fields)) = (payload.as_object_mut(), extra) {
            base.extend(fields);
        }
        payload
    }
}

/// Measures the wall time of a run.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
}

impl SpanTimer {
    /// Starts a timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
