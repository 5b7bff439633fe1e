//! Document webhook endpoints.

use crate::client::{GristClient, decode_on_ok};
use crate::context::RequestContext;
use crate::error::GristResult;
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, Transport};
use serde::{Deserialize, Serialize};

/// Configuration of an existing webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookFields {
    pub name: Option<String>,
    pub memo: Option<String>,
    pub url: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unsubscribe_key: String,
    /// `add` and/or `update`
    pub event_types: Vec<String>,
    pub is_ready_column: Option<String>,
    pub table_id: String,
}

/// Webhook fields to set; unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPartialFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ready_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
}

impl WebhookPartialFields {
    /// Fields for a new webhook posting `event_types` on `table_id` to `url`.
    pub fn new(
        table_id: impl Into<String>,
        url: impl Into<String>,
        event_types: Vec<String>,
    ) -> Self {
        Self {
            table_id: Some(table_id.into()),
            url: Some(url.into()),
            event_types: Some(event_types),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_ready_column(mut self, column: impl Into<String>) -> Self {
        self.is_ready_column = Some(column.into());
        self
    }
}

/// Status of the most recent delivery batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookBatchStatus {
    pub size: i64,
    pub errored_at: Option<i64>,
    pub status: String,
    pub attempts: i64,
}

/// Delivery statistics of a webhook; times are epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookUsage {
    pub num_waiting: i64,
    pub status: String,
    pub updated_time: Option<i64>,
    pub last_success_time: Option<i64>,
    pub last_failure_time: Option<i64>,
    pub last_error_message: Option<String>,
    pub last_http_status: Option<i64>,
    pub last_event_batch: Option<WebhookBatchStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub id: String,
    pub fields: WebhookFields,
    pub usage: Option<WebhookUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct WebhooksList {
    webhooks: Vec<Webhook>,
}

#[derive(Serialize)]
struct WebhookCreate<'a> {
    fields: &'a WebhookPartialFields,
}

#[derive(Serialize)]
struct WebhooksCreateRequest<'a> {
    webhooks: Vec<WebhookCreate<'a>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct WebhookId {
    id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct WebhooksCreateResponse {
    webhooks: Vec<WebhookId>,
}

/// Reply to a webhook deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookDeleteResponse {
    pub success: bool,
}

impl<T: Transport> GristClient<T> {
    pub async fn list_webhooks(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
    ) -> GristResult<ApiResponse<Vec<Webhook>>> {
        let response: ApiResponse<WebhooksList> =
            self.get_json(ctx, &format!("docs/{}/webhooks", doc_id)).await?;
        Ok(response.map(|list| list.webhooks))
    }

    /// Create webhooks and return their ids in request order.
    pub async fn create_webhooks(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        webhooks: &[WebhookPartialFields],
    ) -> GristResult<ApiResponse<Vec<String>>> {
        let request = WebhooksCreateRequest {
            webhooks: webhooks
                .iter()
                .map(|fields| WebhookCreate { fields })
                .collect(),
        };
        let path = format!("docs/{}/webhooks", doc_id);
        let response: ApiResponse<WebhooksCreateResponse> = self
            .exchange_json(ctx, HttpMethod::Post, &path, &request)
            .await?;
        Ok(response.map(|created| created.webhooks.into_iter().map(|w| w.id).collect()))
    }

    pub async fn update_webhook(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        webhook_id: &str,
        fields: &WebhookPartialFields,
    ) -> GristResult<ApiResponse<String>> {
        let path = format!("docs/{}/webhooks/{}", doc_id, webhook_id);
        self.send_json(ctx, HttpMethod::Patch, &path, fields).await
    }

    pub async fn delete_webhook(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
        webhook_id: &str,
    ) -> GristResult<ApiResponse<WebhookDeleteResponse>> {
        let path = format!("docs/{}/webhooks/{}", doc_id, webhook_id);
        let raw = self
            .dispatch(ctx, HttpMethod::Delete, &path, String::new())
            .await?;
        Ok(decode_on_ok(&path, raw))
    }

    /// Drop every pending webhook delivery of a document.
    pub async fn clear_webhook_queue(
        &self,
        ctx: &RequestContext,
        doc_id: &str,
    ) -> GristResult<ApiResponse<String>> {
        let path = format!("docs/{}/webhooks/queue", doc_id);
        self.send_empty(ctx, HttpMethod::Delete, &path).await
    }
}
