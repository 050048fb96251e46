/// Success response encoding
///
/// Success bodies are flattened next to `"error": false`, so a handler only
/// describes its payload:
///
/// ```text
/// ApiResponse::created(MessageBody::new("Task created successfully"))
///   → 201 {"error": false, "message": "Task created successfully"}
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A successful response with its status code
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: T,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    error: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// 201 Created
    pub fn created(body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            error: false,
            body: &self.body,
        };

        // Flattening needs a map-like body; anything else fails here
        match serde_json::to_value(&envelope) {
            Ok(value) => (self.status, Json(value)).into_response(),
            Err(e) => {
                tracing::error!("Failed to encode response body: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": true,
                        "message": "An internal error occurred",
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Body carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn into_parts<T: Serialize>(response: ApiResponse<T>) -> (StatusCode, serde_json::Value) {
        let response = response.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_created_message_is_flattened() {
        let (status, body) =
            into_parts(ApiResponse::created(MessageBody::new("You are successfully registered")))
                .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            serde_json::json!({
                "error": false,
                "message": "You are successfully registered"
            })
        );
    }

    #[tokio::test]
    async fn test_non_object_body_becomes_internal_error() {
        let (status, body) = into_parts(ApiResponse::ok(vec![1, 2, 3])).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], true);
    }
}
