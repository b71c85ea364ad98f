use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(flatten)]
    pub details: ConflictDetails,
}

/// Machine-readable context for a refused deletion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConflictDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategories_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
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

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: ConflictDetails) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}
