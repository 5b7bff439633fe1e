//! Typed payloads of the Grist site and document endpoints.
//!
//! Every field is defaulted on decode: Grist omits keys freely depending on
//! the caller's access level and the endpoint.

use crate::records::Fields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user as reported by access listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Role granted directly, e.g. `owners`, `editors`, `viewers`
    pub access: Option<String>,
    /// Role inherited from the enclosing resource
    pub parent_access: Option<String>,
}

/// An organization (team site).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Org {
    pub id: i64,
    pub name: String,
    pub domain: Option<String>,
    pub created_at: String,
    pub access: Option<String>,
}

/// A workspace and the documents it holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub docs: Vec<Doc>,
    pub is_support_workspace: bool,
    pub org_domain: Option<String>,
    pub org: Option<Org>,
    pub access: Option<String>,
}

/// A document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Doc {
    pub id: String,
    pub name: String,
    pub is_pinned: bool,
    pub access: Option<String>,
    /// Only present when the document is fetched on its own
    pub workspace: Option<Box<Workspace>>,
}

/// Users with access to an org, workspace or document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityAccess {
    pub max_inherited_role: Option<String>,
    pub users: Vec<User>,
}

/// A table of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub tables: Vec<Table>,
}

/// A column of a table; `fields` holds its type, label, formula etc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableColumn {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableColumns {
    pub columns: Vec<TableColumn>,
}

/// Document counts by data limit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLimitStatus {
    pub approaching_limit: i64,
    pub grace_period: i64,
    pub delete_only: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentUsage {
    pub total_bytes: i64,
}

/// Usage summary of an organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgUsage {
    #[serde(rename = "countsByDataLimitStatus", alias = "CountsByDataLimitStatus")]
    pub counts_by_data_limit_status: DataLimitStatus,
    pub attachments: AttachmentUsage,
}

/// Role changes for a workspace: email to role, `None` revokes access.
pub type AccessDelta = BTreeMap<String, Option<String>>;
