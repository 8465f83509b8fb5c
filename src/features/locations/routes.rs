use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationResolver;

/// Create routes for the locations feature
pub fn routes(resolver: Arc<LocationResolver>) -> Router {
    Router::new()
        .route("/api/locations/resolve", post(handlers::resolve_location))
        .route("/api/locations/validate", post(handlers::validate_location))
        .with_state(resolver)
}
