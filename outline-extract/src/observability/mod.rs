//! Observability utilities.

mod spans;
mod subscriber;

pub use spans::{RunSpanAttributes, SpanTimer};
pub use subscriber::{build_dispatch, init_tracing, LogFormat, DEFAULT_FILTER};
