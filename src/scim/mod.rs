//! SCIM 2.0 bulk operations (RFC 7644 §3.7).
//!
//! A bulk request carries an ordered list of HTTP-verb-shaped operations
//! against Grist's `scim/v2` endpoints. The executor validates the envelope,
//! runs each operation strictly in input order and reports every outcome
//! in-band, stopping early once `failOnErrors` failures have been seen.
//!
//! Operation payloads are opaque JSON and are passed through untouched.

mod errors;
mod executor;

pub use errors::ScimErrorResponse;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Schema URN that must tag every bulk request.
pub const BULK_REQUEST_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:BulkRequest";
/// Schema URN of bulk responses.
pub const BULK_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:BulkResponse";
/// Schema URN of SCIM error bodies.
pub const ERROR_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:Error";

/// Path prefix of every SCIM endpoint below `/api/`.
pub const SCIM_PATH_PREFIX: &str = "scim/v2";

/// Methods a bulk operation may use.
pub const BULK_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

/// One unit of work inside a bulk request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimBulkOperation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    /// Resource path such as `/Users` or `/Users/42`
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(
        rename = "bulkId",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub bulk_id: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ScimBulkOperation {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_bulk_id(mut self, bulk_id: impl Into<String>) -> Self {
        self.bulk_id = bulk_id.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// A SCIM bulk request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScimBulkRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schemas: Vec<String>,
    /// Stop after this many failed operations; 0 or less runs every operation
    #[serde(
        rename = "failOnErrors",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub fail_on_errors: i64,
    #[serde(rename = "Operations", default, deserialize_with = "null_as_default")]
    pub operations: Vec<ScimBulkOperation>,
}

impl ScimBulkRequest {
    /// Create a request tagged with the bulk request schema.
    pub fn new(operations: Vec<ScimBulkOperation>) -> Self {
        Self {
            schemas: vec![BULK_REQUEST_SCHEMA.to_string()],
            fail_on_errors: 0,
            operations,
        }
    }

    pub fn with_fail_on_errors(mut self, fail_on_errors: i64) -> Self {
        self.fail_on_errors = fail_on_errors;
        self
    }

    /// Failure count that stops the batch, or `None` when it never stops.
    pub fn error_threshold(&self) -> Option<usize> {
        usize::try_from(self.fail_on_errors).ok().filter(|n| *n > 0)
    }

    /// Whether `schemas` carries the bulk request marker.
    pub fn has_bulk_schema(&self) -> bool {
        self.schemas.iter().any(|schema| schema == BULK_REQUEST_SCHEMA)
    }
}

impl Default for ScimBulkRequest {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Outcome of one bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimBulkOperationResponse {
    #[serde(default)]
    pub method: String,
    #[serde(rename = "bulkId", default, skip_serializing_if = "String::is_empty")]
    pub bulk_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// URI of the created or replaced resource
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    /// HTTP status as a decimal string, e.g. `"201"`
    pub status: String,
    /// Decoded body, raw body text, or a SCIM error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl ScimBulkOperationResponse {
    /// Numeric status; unparseable strings read as 0.
    pub fn status_code(&self) -> i32 {
        self.status.parse().unwrap_or(0)
    }

    /// Whether this operation counts toward `failOnErrors`.
    ///
    /// Only statuses of 400 and above do. The negative statuses of exchanges
    /// that never produced a response are reported but not counted.
    pub fn is_error(&self) -> bool {
        self.status_code() >= 400
    }
}

/// A SCIM bulk response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScimBulkResponse {
    pub schemas: Vec<String>,
    #[serde(rename = "Operations", default)]
    pub operations: Vec<ScimBulkOperationResponse>,
}

impl ScimBulkResponse {
    pub fn new(operations: Vec<ScimBulkOperationResponse>) -> Self {
        Self {
            schemas: vec![BULK_RESPONSE_SCHEMA.to_string()],
            operations,
        }
    }

    /// Number of failed operations in the response.
    pub fn error_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_error()).count()
    }
}

impl Default for ScimBulkResponse {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Decode an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
