//! Record CRUD for Grist tables.
//!
//! Record schemas are not known ahead of time: columns vary per table and per
//! document. Field maps are therefore dynamic JSON maps and column names are
//! passed through verbatim, never checked against a schema.
//!
//! # Key Types
//!
//! - [`Record`] - A row with its id and fields
//! - [`RecordWithRequire`] - An upsert row keyed by a `require` match
//! - [`RecordQueryOptions`] - Filter/sort/limit/hidden options for fetches
//! - [`AddRecordsOptions`], [`UpdateRecordsOptions`], [`UpsertRecordsOptions`] - Write options
//!
//! # Examples
//!
//! ```rust,no_run
//! use gristctl::{GristClient, RequestContext};
//! use gristctl::records::{RecordQueryOptions, UpsertRecordsOptions, OnMany, RecordWithRequire};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GristClient::from_env()?;
//! let ctx = RequestContext::with_generated_id();
//!
//! let options = RecordQueryOptions::new()
//!     .with_filter("status", vec![json!("open")])
//!     .with_sort("-created")
//!     .with_limit(20);
//! let open = client.fetch_records(&ctx, "docId", "Tickets", Some(&options)).await?;
//!
//! let row = RecordWithRequire::new(json!({"email": "ada@example.com"}))
//!     .with_fields(json!({"name": "Ada"}));
//! let upsert = UpsertRecordsOptions::new().with_on_many(OnMany::First);
//! client.upsert_records(&ctx, "docId", "People", vec![row], Some(&upsert)).await?;
//! # Ok(())
//! # }
//! ```

mod operations;
mod options;

pub use options::{
    AddRecordsOptions, OnMany, RecordQueryOptions, UpdateRecordsOptions, UpsertRecordsOptions,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column name to value map of a single row.
pub type Fields = Map<String, Value>;

/// A row of a table.
///
/// `id` is assigned by the server; it is 0 (and omitted on the wire) for rows
/// that have not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: i64,
    #[serde(default)]
    pub fields: Fields,
}

impl Record {
    /// Build a record targeting an existing row.
    pub fn new(id: i64, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Look up a column value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }
}

/// An upsert row: `require` selects the rows to update, `fields` carries the
/// values to write.
///
/// `require` values may be operator-shaped (e.g. `{"$gt": 5}`); they are sent
/// as-is. An empty `require` is rejected by the server unless
/// `allow_empty_require` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordWithRequire {
    pub require: Fields,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Fields,
}

impl RecordWithRequire {
    /// Create an upsert row from a JSON object of match conditions.
    ///
    /// Non-object values produce an empty `require`.
    pub fn new(require: Value) -> Self {
        Self {
            require: into_fields(require),
            fields: Fields::new(),
        }
    }

    /// Set the values to write from a JSON object.
    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = into_fields(fields);
        self
    }
}

/// `{"records": [...]}` envelope returned by `GET /records`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RecordsList {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// `{"records": [{"id": ..}, ...]}` envelope returned by `POST /records`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RecordIds {
    #[serde(default)]
    pub records: Vec<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RecordId {
    pub id: i64,
}

/// Request envelope for writes: `{"records": [...]}`.
#[derive(Debug, Serialize)]
pub(crate) struct RecordsEnvelope<'a, R: Serialize> {
    pub records: &'a [R],
}

/// Field-only row used by `POST /records`.
#[derive(Debug, Serialize)]
pub(crate) struct NewRecord<'a> {
    pub fields: &'a Fields,
}

fn is_unassigned(id: &i64) -> bool {
    *id == 0
}

fn into_fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}
