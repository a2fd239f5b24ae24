//! Shared response envelope for API handlers.
//!
//! Every route answers `{ "success": bool, "message": string | null,
//! "data"?: T }`. Errors use the same shape (see [`crate::error`]).

use serde::Serialize;

/// Standard response envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("nothing changed")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "message": "nothing changed" })
        );
    }

    #[test]
    fn data_envelope_has_null_message() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["message"].is_null());
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
