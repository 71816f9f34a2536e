use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// The uniform body returned across the HTTP boundary.
///
/// Every outcome is wrapped in this shape with HTTP 200: `success` reports
/// whether the operation completed, the verdict or failure text is in
/// `message`, and `content` carries the created record's id on successful
/// employee creation. Callers never see raw Odoo payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl GatewayResponse {
    /// A successful outcome with the given message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            content: None,
        }
    }

    /// A successful outcome carrying a content payload.
    #[must_use]
    pub fn success_with_content(message: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            content: Some(content.into()),
        }
    }

    /// A failed outcome with the given message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            content: None,
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn content_is_omitted_unless_populated() {
        assert_eq!(
            serde_json::to_value(GatewayResponse::failure("Login failed.")).unwrap(),
            json!({"success": false, "message": "Login failed."})
        );
        assert_eq!(
            serde_json::to_value(GatewayResponse::success_with_content(
                "Posting Successful.",
                "7"
            ))
            .unwrap(),
            json!({"success": true, "message": "Posting Successful.", "content": "7"})
        );
    }
}
