//! Route assembly: operational routes plus the versioned customer API.

mod common;
mod customer;

pub use common::common_routes_with_ready;
pub use customer::customer_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: `/health`, `/ready`, `/version` and `/api/v1/customers`, with
/// request tracing and a request body size cap.
pub fn app_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api/v1", customer_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}
