//! Router assembly.

mod catalog;
mod ops;
pub use catalog::{catalog_routes, MAX_BODY_BYTES};
pub use ops::ops_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: catalog resources plus operational probes, traced per request.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(ops_routes(state.clone()))
        .merge(catalog_routes(state))
        .layer(TraceLayer::new_for_http())
}
