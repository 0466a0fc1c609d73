use serde::Serialize;
use utoipa::ToSchema;

/// Uniform response envelope. `message` and `data` are omitted from the
/// JSON when unset, so plain acknowledgements stay small.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
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
    fn test_data_envelope_omits_message() {
        let json = serde_json::to_value(ApiResponse::data(vec![1, 2, 3])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_with_message_envelope_carries_both() {
        let json = serde_json::to_value(ApiResponse::with_message("Created", 42)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Created");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Deleted")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Deleted");
        assert!(json.get("data").is_none());
    }
}
