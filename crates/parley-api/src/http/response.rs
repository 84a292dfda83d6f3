//! Response envelope.
//!
//! Every successful response wraps its payload as `{"data": ...}`; error
//! bodies carry `data: null` plus a generic error list (built by
//! `AppError`).

use serde::Serialize;

/// Envelope wrapping all API payloads.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: &str) -> Self {
        Self {
            data: None,
            errors: vec![ApiErrorDetail {
                message: message.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_bare_data_envelope() {
        let json = serde_json::to_value(ApiResponse::success(serde_json::json!({"k": 1}))).unwrap();
        assert_eq!(json, serde_json::json!({"data": {"k": 1}}));
    }

    #[test]
    fn error_carries_null_data_and_message() {
        let json = serde_json::to_value(ApiResponse::error("nope")).unwrap();
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["errors"][0]["message"], "nope");
    }
}
