//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, warn};

/// Log every request with its outcome and latency.
///
/// Client errors (rejected registrations) log at `warn`, server errors at `error`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        error!(%method, %path, %status, latency_ms, "Request errored");
    } else if status.is_client_error() {
        warn!(%method, %path, %status, latency_ms, "Request rejected");
    } else {
        debug!(%method, %path, %status, latency_ms, "Request completed");
    }

    response
}
