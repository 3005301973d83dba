//! HTTP middleware layers.
//!
//! - [`tracing`] - Request spans and latency logging
//! - [`timeout`] - Per-request deadline

pub mod timeout;
pub mod tracing;
