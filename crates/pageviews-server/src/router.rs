//! Axum router wiring.
//!
//! Counter routes are mounted at `/counters` and at `/api/pageViews`, the
//! path existing blog widgets call.

use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::{app_state::AppState, http, ops};

pub const COUNTER_ROUTES: [&str; 2] = ["/counters", "/api/pageViews"];

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();
    for route in COUNTER_ROUTES {
        router = router.route(
            route,
            get(http::counters::get_count)
                .put(http::counters::increment)
                .options(http::counters::preflight)
                .fallback(http::counters::method_not_allowed),
        );
    }

    router
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .fallback(not_found)
        .layer(middleware::map_response(http::cors::apply))
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
