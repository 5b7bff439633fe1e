//! Site and document management endpoints.
//!
//! These are thin typed wrappers over the Grist REST API that share the
//! record operations' conventions: payloads are decoded on HTTP 200 only,
//! writes without a structured reply return the raw body, and every call is
//! a single round trip.
//!
//! # Modules
//!
//! - [`orgs`] - Organizations, their members, workspaces and usage
//! - [`workspaces`] - Workspaces and their access lists
//! - [`docs`] - Documents, tables, columns, history and CSV export
//! - [`users`] - Account deletion
//! - [`webhooks`] - Document webhooks and their delivery queue
//! - [`attachments`] - Attachment metadata

pub mod attachments;
pub mod docs;
pub mod models;
pub mod orgs;
pub mod users;
pub mod webhooks;
pub mod workspaces;

pub use attachments::{AttachmentMetadata, AttachmentQueryOptions, AttachmentRecord};
pub use models::{
    AccessDelta, AttachmentUsage, DataLimitStatus, Doc, EntityAccess, Org, OrgUsage, Table,
    TableColumn, TableColumns, Tables, User, Workspace,
};
pub use webhooks::{
    Webhook, WebhookBatchStatus, WebhookDeleteResponse, WebhookFields, WebhookPartialFields,
    WebhookUsage,
};
