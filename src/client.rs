//! The Grist client: configuration, dispatch and shared request helpers.
//!
//! [`GristClient`] wraps a [`Transport`] and is the entry point for every
//! operation in this crate. Operations live in their own modules
//! (`records`, `scim`, `api`) as `impl` blocks on the client.
//!
//! Each call is a single sequential round trip: the client never retries,
//! never fans out and holds no state besides its read-only transport.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gristctl::{GristClient, RequestContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GristClient::from_env()?;
//! let context = RequestContext::with_generated_id();
//!
//! let response = client.fetch_records(&context, "docId", "Table1", None).await?;
//! if response.is_ok() {
//!     println!("{} records", response.data.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::error::{GristError, GristResult};
use crate::response::ApiResponse;
use crate::transport::{HttpMethod, HttpTransport, RawResponse, Transport};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client for the Grist REST API.
pub struct GristClient<T: Transport> {
    pub(crate) transport: T,
}

impl GristClient<HttpTransport> {
    /// Create an HTTP client from explicit configuration.
    pub fn from_config(config: &ClientConfig) -> GristResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Create an HTTP client from `GRIST_URL` / `GRIST_TOKEN`.
    pub fn from_env() -> GristResult<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    /// Create an HTTP client from the environment, falling back to `~/.gristle`.
    pub fn load() -> GristResult<Self> {
        Self::from_config(&ClientConfig::load()?)
    }
}

impl<T: Transport> GristClient<T> {
    /// Create a client over any transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get access to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Server root URL.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Check that the server answers `GET orgs` with 200.
    pub async fn test_connection(&self, ctx: &RequestContext) -> GristResult<bool> {
        let raw = self.dispatch(ctx, HttpMethod::Get, "orgs", String::new()).await?;
        Ok(raw.status == 200)
    }

    /// Issue one request under the caller's context.
    ///
    /// The round trip is raced against the context's cancellation token and
    /// bounded by its deadline. A context that is already cancelled never
    /// reaches the transport.
    pub(crate) async fn dispatch(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        path: &str,
        body: String,
    ) -> GristResult<RawResponse> {
        if ctx.is_cancelled() {
            warn!(
                "Skipping {} {}: context already cancelled (request: '{}')",
                method, path, ctx.request_id
            );
            return Err(GristError::Cancelled);
        }

        debug!("Dispatching {} {} (request: '{}')", method, path, ctx.request_id);

        let exchange = self.transport.send(method, path, body);
        let bounded = async {
            match ctx.deadline {
                Some(limit) => match tokio::time::timeout(limit, exchange).await {
                    Ok(result) => result,
                    Err(_) => Err(GristError::timeout(format!(
                        "no response to {} {} within {:?}",
                        method, path, limit
                    ))),
                },
                None => exchange.await,
            }
        };

        let result = tokio::select! {
            biased;
            _ = ctx.cancellation.cancelled() => Err(GristError::Cancelled),
            result = bounded => result,
        };

        match &result {
            Ok(raw) if raw.status >= 400 => debug!(
                "{} {} returned status {} (request: '{}')",
                method, path, raw.status, ctx.request_id
            ),
            Ok(_) => {}
            Err(e) => warn!(
                "{} {} failed: {} (request: '{}')",
                method, path, e, ctx.request_id
            ),
        }

        result
    }

    /// GET `path` and decode the body on 200, or return `D::default()`.
    pub(crate) async fn get_json<D>(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> GristResult<ApiResponse<D>>
    where
        D: DeserializeOwned + Default,
    {
        let raw = self.dispatch(ctx, HttpMethod::Get, path, String::new()).await?;
        Ok(decode_on_ok(path, raw))
    }

    /// Serialize `body`, send it and return the raw response body.
    ///
    /// Serialization failures are reported before any network call.
    pub(crate) async fn send_json<B>(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> GristResult<ApiResponse<String>>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_string(body)?;
        let raw = self.dispatch(ctx, method, path, payload).await?;
        Ok(ApiResponse::new(raw.status, raw.body))
    }

    /// Serialize `body`, send it and decode the reply on 200.
    pub(crate) async fn exchange_json<B, D>(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> GristResult<ApiResponse<D>>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned + Default,
    {
        let payload = serde_json::to_string(body)?;
        let raw = self.dispatch(ctx, method, path, payload).await?;
        Ok(decode_on_ok(path, raw))
    }

    /// Send a request without a body and return the raw response body.
    pub(crate) async fn send_empty(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        path: &str,
    ) -> GristResult<ApiResponse<String>> {
        let raw = self.dispatch(ctx, method, path, String::new()).await?;
        Ok(ApiResponse::new(raw.status, raw.body))
    }
}

/// Decode a typed payload from a 200 response.
///
/// Any other status yields the default value. A 200 body that does not decode
/// is logged and also yields the default: the status stays authoritative.
pub(crate) fn decode_on_ok<D>(path: &str, raw: RawResponse) -> ApiResponse<D>
where
    D: DeserializeOwned + Default,
{
    if raw.status != 200 {
        return ApiResponse::new(raw.status, D::default());
    }
    let data = serde_json::from_str(&raw.body).unwrap_or_else(|e| {
        warn!("Unable to decode response from {}: {}", path, e);
        D::default()
    });
    ApiResponse::new(raw.status, data)
}
