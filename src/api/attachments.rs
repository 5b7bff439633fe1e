//! Attachment metadata endpoints.
//!
//! Attachment contents are binary and are not handled here; only the JSON
//! endpoints describing and cleaning up attachments are.

use crate::client::GristClient;
use crate::context::RequestContext;
use crate::error::GristResult;
use crate::query::build_query;
use crate::records::RecordQueryOptions;
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, Transport};
use serde::{Deserialize, Serialize};

/// Attachment listings take the same filter/sort/limit/hidden options as
/// record fetches.
pub type AttachmentQueryOptions = RecordQueryOptions;

/// Metadata of one attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentMetadata {
    pub file_name: String,
    pub file_size: i64,
    /// ISO 8601 upload time
    pub time_uploaded: String,
}

/// A row of the document's attachment table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentRecord {
    pub id: i64,
    pub fields: AttachmentMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AttachmentList {
    records: Vec<AttachmentRecord>,
}

impl<T: Transport> GristClient<T> {
    pub async fn list_attachments(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        options: Option<&AttachmentQueryOptions>,
    ) -> GristResult<ApiResponse<Vec<AttachmentRecord>>> {
        let query = match options {
            Some(options) => build_query(&options.query_params()?),
            None => String::new(),
        };
        let path = format!("docs/{}/attachments{}", doc_id, query);
        let response: ApiResponse<AttachmentList> = self.get_json(ctx, &path).await?;
        Ok(response.map(|list| list.records))
    }

    pub async fn get_attachment_metadata(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        attachment_id: i64,
    ) -> GristResult<ApiResponse<AttachmentMetadata>> {
        self.get_json(ctx, &format!("docs/{}/attachments/{}", doc_id, attachment_id))
            .await
    }

    /// Delete attachments no longer referenced by any cell.
    pub async fn remove_unused_attachments(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
    ) -> GristResult<ApiResponse<String>> {
        let path = format!("docs/{}/attachments/removeUnused", doc_id);
        self.send_empty(ctx, HttpMethod::Post, &path).await
    }
}
