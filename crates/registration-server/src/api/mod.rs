//! HTTP API for the registration service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::retry::RetryPolicy;
use axum::{middleware as axum_middleware, routing::get, Router};
use registration_core::RegistrationStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration storage backend
    pub store: Arc<dyn RegistrationStore>,
    /// Retry policy applied to every store call
    pub retry: RetryPolicy,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn RegistrationStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/registration",
            get(handlers::list_registrations).post(handlers::create_registration),
        )
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
