use serde::Serialize;
use utoipa::ToSchema;

/// Body for responses that only carry a human readable message.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
