// JSON response helpers for the HTTP handlers
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;

pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

/// Error body carrying one human-readable message.
pub fn error_response(status: StatusCode, error: impl Display) -> Response {
    let message = error.to_string();
    tracing::warn!(%status, "Responding with error: {}", message);
    json_response(status, json!({ "error": message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = error_response(StatusCode::BAD_GATEWAY, "backend request failed: timeout");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
