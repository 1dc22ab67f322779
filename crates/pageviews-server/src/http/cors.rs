//! Permissive CORS: every response, including errors and router fallbacks,
//! carries the same three headers.

use axum::{
    http::{header, HeaderValue},
    response::Response,
};

pub async fn apply(mut res: Response) -> Response {
    let h = res.headers_mut();
    h.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    h.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("*"));
    h.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    res
}
