//! SCIM error bodies and locally synthesized operation failures.
//!
//! Malformed operations are answered here without a network call. The
//! `scimType` and `detail` strings are advisory: they follow the SCIM error
//! shape but are not guaranteed to match what the server would say.

use super::{ERROR_SCHEMA, ScimBulkOperationResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `scimType` used for every locally rejected operation.
pub const INVALID_SYNTAX: &str = "invalidSyntax";

/// A SCIM error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScimErrorResponse {
    pub schemas: Vec<String>,
    pub detail: String,
    pub status: String,
    #[serde(rename = "scimType", default, skip_serializing_if = "String::is_empty")]
    pub scim_type: String,
}

impl ScimErrorResponse {
    /// A 400 `invalidSyntax` error with the given detail.
    pub fn invalid_syntax(detail: impl Into<String>) -> Self {
        Self {
            schemas: vec![ERROR_SCHEMA.to_string()],
            detail: detail.into(),
            status: "400".to_string(),
            scim_type: INVALID_SYNTAX.to_string(),
        }
    }

    fn to_value(&self) -> Value {
        serde_json::json!({
            "schemas": self.schemas,
            "detail": self.detail,
            "status": self.status,
            "scimType": self.scim_type,
        })
    }
}

/// Build the local 400 response for an operation that never left the client.
pub(crate) fn rejected_operation(
    method: &str,
    bulk_id: &str,
    error: ScimErrorResponse,
) -> ScimBulkOperationResponse {
    ScimBulkOperationResponse {
        method: method.to_string(),
        bulk_id: bulk_id.to_string(),
        status: error.status.clone(),
        response: Some(error.to_value()),
        ..ScimBulkOperationResponse::default()
    }
}

pub(crate) fn invalid_method(method: &str) -> ScimErrorResponse {
    ScimErrorResponse::invalid_syntax(format!("Invalid method: {}", method))
}

pub(crate) fn path_required() -> ScimErrorResponse {
    ScimErrorResponse::invalid_syntax("Path is required")
}

pub(crate) fn invalid_request_data() -> ScimErrorResponse {
    ScimErrorResponse::invalid_syntax("Invalid request data")
}

pub(crate) fn invalid_json_body() -> ScimErrorResponse {
    ScimErrorResponse::invalid_syntax("Invalid JSON in request body")
}
