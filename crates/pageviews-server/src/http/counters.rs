//! Counter endpoints.
//!
//! - `OPTIONS` : preflight, `{}`
//! - `GET ?path=P` : `{"count": n}`
//! - `PUT {"path": P}` : 204, no body

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use pageviews_core::PageViewsError;

use crate::app_state::AppState;
use crate::http::error::{ApiError, Surface};
use crate::obs::ServiceMetrics;

pub async fn preflight() -> impl IntoResponse {
    Json(json!({}))
}

pub async fn get_count(
    State(app): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let req = Inflight::start(app.metrics(), "get");
    let res = match app.counters().get_count(q.get("path").map(String::as_str)).await {
        Ok(count) => Json(json!({ "count": count })).into_response(),
        Err(e) => fail(&app, "get", Surface::Read, e),
    };
    req.finish(res.status());
    res
}

pub async fn increment(
    State(app): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let req = Inflight::start(app.metrics(), "put");
    let res = match body.map_err(body_error).and_then(|b| parse_path(&b)) {
        Ok(path) => match app.counters().increment(path.as_deref()).await {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => fail(&app, "put", Surface::Write, e),
        },
        Err(e) => fail(&app, "put", Surface::Write, e),
    };
    req.finish(res.status());
    res
}

/// Requests for a method a counter route does not serve.
pub async fn method_not_allowed() -> Response {
    let body = Json(json!({
        "error": "Method Not Allowed",
        "code": "METHOD_NOT_ALLOWED",
    }));
    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}

fn body_error(rejection: BytesRejection) -> PageViewsError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PageViewsError::PayloadTooLarge
    } else {
        PageViewsError::MalformedRequest(rejection.body_text())
    }
}

/// Pull `path` out of a JSON object body. A non-string `path` counts as missing.
fn parse_path(body: &[u8]) -> Result<Option<String>, PageViewsError> {
    let v: Value = serde_json::from_slice(body)
        .map_err(|e| PageViewsError::MalformedRequest(e.to_string()))?;
    let obj = v
        .as_object()
        .ok_or_else(|| PageViewsError::MalformedRequest("body must be a JSON object".into()))?;
    Ok(obj.get("path").and_then(Value::as_str).map(str::to_string))
}

fn fail(app: &AppState, op: &'static str, surface: Surface, e: PageViewsError) -> Response {
    if e.is_client_error() {
        tracing::debug!(op, error = %e, "rejected counter request");
    } else {
        tracing::error!(op, error = %e, "counter request failed");
        app.metrics().store_errors.inc(&[("op", op)]);
    }
    ApiError::new(surface, e).into_response()
}

/// Tracks one request in the metrics registry from start to response.
struct Inflight<'a> {
    metrics: &'a ServiceMetrics,
    op: &'static str,
    started: Instant,
}

impl<'a> Inflight<'a> {
    fn start(metrics: &'a ServiceMetrics, op: &'static str) -> Self {
        metrics.in_flight.inc(&[("op", op)]);
        Self { metrics, op, started: Instant::now() }
    }

    fn finish(self, status: StatusCode) {
        let labels = [("op", self.op)];
        self.metrics.requests.inc(&[("op", self.op), ("status", status.as_str())]);
        self.metrics.request_duration.observe(&labels, self.started.elapsed());
    }
}

impl Drop for Inflight<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.dec(&[("op", self.op)]);
    }
}
