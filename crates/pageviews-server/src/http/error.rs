//! HTTP mapping for `PageViewsError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pageviews_core::PageViewsError;

/// Which endpoint produced the error. A bad `path` is a 404 on reads and a
/// 400 on writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Read,
    Write,
}

#[derive(Debug)]
pub struct ApiError {
    surface: Surface,
    err: PageViewsError,
}

impl ApiError {
    pub fn new(surface: Surface, err: PageViewsError) -> Self {
        Self { surface, err }
    }

    pub fn status(&self) -> StatusCode {
        match (&self.err, self.surface) {
            (PageViewsError::InvalidArgument(_), Surface::Read) => StatusCode::NOT_FOUND,
            (PageViewsError::InvalidArgument(_), Surface::Write)
            | (PageViewsError::TypeConflict(_), _)
            | (PageViewsError::MalformedRequest(_), _) => StatusCode::BAD_REQUEST,
            (PageViewsError::PayloadTooLarge, _) => StatusCode::PAYLOAD_TOO_LARGE,
            (PageViewsError::StoreUnavailable(_), _) | (PageViewsError::Config(_), _) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.err.public_message(),
            "code": self.err.client_code().as_str(),
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_status_depends_on_surface() {
        let read = ApiError::new(Surface::Read, PageViewsError::InvalidArgument("x".into()));
        let write = ApiError::new(Surface::Write, PageViewsError::InvalidArgument("x".into()));
        assert_eq!(read.status(), StatusCode::NOT_FOUND);
        assert_eq!(write.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_and_conflict_statuses() {
        let e = ApiError::new(Surface::Write, PageViewsError::TypeConflict("hash".into()));
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        let e = ApiError::new(Surface::Read, PageViewsError::StoreUnavailable("down".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let e = ApiError::new(Surface::Write, PageViewsError::PayloadTooLarge);
        assert_eq!(e.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
