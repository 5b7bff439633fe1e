//! Record operations on [`GristClient`].

use super::{
    AddRecordsOptions, Fields, NewRecord, Record, RecordIds, RecordQueryOptions,
    RecordWithRequire, RecordsEnvelope, RecordsList, UpdateRecordsOptions, UpsertRecordsOptions,
};
use crate::client::{GristClient, decode_on_ok};
use crate::context::RequestContext;
use crate::error::GristResult;
use crate::query::{QueryParams, build_query};
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, Transport};
use log::debug;

pub(crate) fn records_path(doc_id: &str, table_id: &str, params: &QueryParams) -> String {
    format!(
        "docs/{}/tables/{}/records{}",
        doc_id,
        table_id,
        build_query(params)
    )
}

impl<T: Transport> GristClient<T> {
    /// Fetch the records of a table.
    ///
    /// Records are decoded only on HTTP 200. Any other status comes back with
    /// an empty list; check the status, not the length.
    pub async fn fetch_records(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        table_id: &str,
        options: Option<&RecordQueryOptions>,
    ) -> GristResult<ApiResponse<Vec<Record>>> {
        let params = match options {
            Some(options) => options.query_params()?,
            None => QueryParams::new(),
        };
        let path = records_path(doc_id, table_id, &params);

        let raw = self.dispatch(ctx, HttpMethod::Get, &path, String::new()).await?;
        let response = decode_on_ok::<RecordsList>(&path, raw).map(|list| list.records);
        debug!(
            "Fetched {} records from {}/{} (request: '{}')",
            response.data.len(),
            doc_id,
            table_id,
            ctx.request_id
        );
        Ok(response)
    }

    /// Add one record per field map and return the ids the server assigned.
    pub async fn add_records(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        table_id: &str,
        records: Vec<Fields>,
        options: Option<&AddRecordsOptions>,
    ) -> GristResult<ApiResponse<Vec<i64>>> {
        let params = options.map(AddRecordsOptions::query_params).unwrap_or_default();
        let path = records_path(doc_id, table_id, &params);

        let rows: Vec<NewRecord<'_>> = records
            .iter()
            .map(|fields| NewRecord { fields })
            .collect();
        // Field maps hold only JSON values, so this cannot fail in practice.
        let body = serde_json::to_string(&RecordsEnvelope {
            records: rows.as_slice(),
        })?;

        let raw = self.dispatch(ctx, HttpMethod::Post, &path, body).await?;
        Ok(decode_on_ok::<RecordIds>(&path, raw)
            .map(|ids| ids.records.into_iter().map(|record| record.id).collect()))
    }

    /// Update existing records by id. Returns the raw response body.
    pub async fn update_records(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        table_id: &str,
        records: Vec<Record>,
        options: Option<&UpdateRecordsOptions>,
    ) -> GristResult<ApiResponse<String>> {
        let params = options.map(UpdateRecordsOptions::query_params).unwrap_or_default();
        let path = records_path(doc_id, table_id, &params);
        let envelope = RecordsEnvelope {
            records: records.as_slice(),
        };
        self.send_json(ctx, HttpMethod::Patch, &path, &envelope).await
    }

    /// Insert or update records matched by their `require` conditions.
    /// Returns the raw response body.
    pub async fn upsert_records(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        table_id: &str,
        records: Vec<RecordWithRequire>,
        options: Option<&UpsertRecordsOptions>,
    ) -> GristResult<ApiResponse<String>> {
        let params = options.map(UpsertRecordsOptions::query_params).unwrap_or_default();
        let path = records_path(doc_id, table_id, &params);
        let envelope = RecordsEnvelope {
            records: records.as_slice(),
        };
        self.send_json(ctx, HttpMethod::Put, &path, &envelope).await
    }

    /// Delete records by id.
    ///
    /// Ids are sent as given, duplicates included.
    pub async fn delete_records(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        table_id: &str,
        ids: &[i64],
    ) -> GristResult<ApiResponse<String>> {
        let path = format!("docs/{}/tables/{}/records/delete", doc_id, table_id);
        self.send_json(ctx, HttpMethod::Post, &path, ids).await
    }
}
