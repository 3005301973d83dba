//! Request deadline middleware.

use axum::http::StatusCode;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Aborts requests that run longer than `timeout`.
///
/// The handler future is dropped when the deadline passes, which cancels any
/// in-flight store or cache call. The client receives `408 Request Timeout`.
pub fn layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
