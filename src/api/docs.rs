//! Document and table metadata endpoints.

use super::models::{Doc, EntityAccess, TableColumns, Tables};
use crate::client::GristClient;
use crate::context::RequestContext;
use crate::error::GristResult;
use crate::query::{QueryParams, build_query};
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, Transport};
use serde::Serialize;

#[derive(Serialize)]
struct MoveTarget {
    workspace: i64,
}

#[derive(Serialize)]
struct KeepStates {
    keep: usize,
}

impl<T: Transport> GristClient<T> {
    pub async fn get_doc(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
    ) -> GristResult<ApiResponse<Doc>> {
        self.get_json(ctx, &format!("docs/{}", doc_id)).await
    }

    pub async fn get_doc_tables(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
    ) -> GristResult<ApiResponse<Tables>> {
        self.get_json(ctx, &format!("docs/{}/tables", doc_id)).await
    }

    pub async fn get_table_columns(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        table_id: &str,
    ) -> GristResult<ApiResponse<TableColumns>> {
        self.get_json(ctx, &format!("docs/{}/tables/{}/columns", doc_id, table_id))
            .await
    }

    pub async fn get_doc_access(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
    ) -> GristResult<ApiResponse<EntityAccess>> {
        self.get_json(ctx, &format!("docs/{}/access", doc_id)).await
    }

    /// Move a document to another workspace.
    pub async fn move_doc(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        workspace_id: i64,
    ) -> GristResult<ApiResponse<String>> {
        let target = MoveTarget {
            workspace: workspace_id,
        };
        self.send_json(ctx, HttpMethod::Patch, &format!("docs/{}/move", doc_id), &target)
            .await
    }

    /// Drop all but the `keep` most recent states of a document's history.
    pub async fn purge_doc_history(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        keep: usize,
    ) -> GristResult<ApiResponse<String>> {
        let path = format!("docs/{}/states/remove", doc_id);
        self.send_json(ctx, HttpMethod::Post, &path, &KeepStates { keep })
            .await
    }

    pub async fn delete_doc(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
    ) -> GristResult<ApiResponse<String>> {
        self.send_empty(ctx, HttpMethod::Delete, &format!("docs/{}", doc_id))
            .await
    }

    /// Download one table as CSV text.
    ///
    /// The body is returned as-is for every status.
    pub async fn download_table_csv(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        table_id: &str,
    ) -> GristResult<ApiResponse<String>> {
        let mut params = QueryParams::new();
        params.insert("tableId".to_string(), table_id.to_string());
        let path = format!("docs/{}/download/csv{}", doc_id, build_query(&params));
        self.send_empty(ctx, HttpMethod::Get, &path).await
    }
}
