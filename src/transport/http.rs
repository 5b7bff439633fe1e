//! reqwest-backed transport.

use super::{HttpMethod, RawResponse, Transport};
use crate::config::ClientConfig;
use crate::error::{ConfigError, GristError, GristResult};
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};

/// HTTP transport talking to `{base_url}/api/{path}` with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    bearer: String,
}

impl HttpTransport {
    /// Build a transport from validated configuration.
    pub fn new(config: &ClientConfig) -> GristResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            message: e.to_string(),
        })?;

        Self::with_client(config, client)
    }

    /// Build a transport around a preconfigured `reqwest::Client`.
    ///
    /// The client's own settings (timeouts, proxies, TLS) are used as-is;
    /// `config.timeout` and `config.user_agent` are ignored.
    pub fn with_client(config: &ClientConfig, client: reqwest::Client) -> GristResult<Self> {
        config.validate()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            bearer: format!("Bearer {}", config.token),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: HttpMethod, path: &str, body: String) -> GristResult<RawResponse> {
        let url = self.url_for(path);
        let authorization = HeaderValue::from_str(&self.bearer)
            .map_err(|e| GristError::invalid_request(format!("Invalid API token header: {}", e)))?;

        let request = self
            .client
            .request(method.into(), &url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(|e| {
                GristError::invalid_request(format!("Error creating request {}: {}", url, e))
            })?;

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Request {} {} timed out", method, url);
                return Err(GristError::timeout(format!("Error sending request {}: {}", url, e)));
            }
            Err(e) => {
                warn!("Request {} {} failed: {}", method, url, e);
                return Err(GristError::transport(format!(
                    "Error sending request {}: {}",
                    url, e
                )));
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Error reading response {}: {}", url, e);
                String::new()
            }
        };

        debug!("{} {} -> {} ({} bytes)", method, url, status, body.len());
        Ok(RawResponse { status, body })
    }
}
