//! Response envelope shared by every API route.

use serde::{Deserialize, Serialize};

/// `{success, data?, error?}` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_omits_error_field() {
        let json = serde_json::to_string(&ApiResponse::ok(serde_json::json!({"x": 1}))).unwrap();
        assert_eq!(json, r#"{"success":true,"data":{"x":1}}"#);
    }

    #[test]
    fn test_error_omits_data_field() {
        let json =
            serde_json::to_string(&ApiResponse::<serde_json::Value>::error("nope")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"nope"}"#);
    }
}
