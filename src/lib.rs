//! Grist REST API client library for Rust.
//!
//! Provides an async client for Grist's records, SCIM bulk and site
//! management endpoints over a pluggable transport.
//!
//! # Core Components
//!
//! - [`GristClient`] - Entry point for every operation
//! - [`Transport`] - Trait for a single HTTP round trip, with [`HttpTransport`] as the default
//! - [`records`] - Option-driven record fetch, add, update, upsert and delete
//! - [`scim`] - Sequential SCIM bulk execution with early stop
//!
//! # Error Model
//!
//! Failures on this side of the wire are [`GristError`]s. A request that
//! reaches the server always succeeds as a call: its HTTP status, 2xx or not,
//! comes back in the [`ApiResponse`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gristctl::{ClientConfig, GristClient, RequestContext};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("https://docs.getgrist.com", "api-key")
//!     .with_timeout(Duration::from_secs(30));
//! let client = GristClient::from_config(&config)?;
//! let context = RequestContext::with_generated_id();
//!
//! let response = client.fetch_records(&context, "docId", "Table1", None).await?;
//! for record in &response.data {
//!     println!("{}: {:?}", record.id, record.fields);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod query;
pub mod records;
pub mod response;
pub mod scim;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::GristClient;
pub use config::ClientConfig;
pub use context::RequestContext;
pub use error::{ConfigError, ConfigResult, GristError, GristResult};
pub use response::ApiResponse;
pub use transport::{HttpMethod, HttpTransport, RawResponse, Transport};

pub use records::{
    AddRecordsOptions, Fields, OnMany, Record, RecordQueryOptions, RecordWithRequire,
    UpdateRecordsOptions, UpsertRecordsOptions,
};
pub use scim::{
    ScimBulkOperation, ScimBulkOperationResponse, ScimBulkRequest, ScimBulkResponse,
    ScimErrorResponse,
};
