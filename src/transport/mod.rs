//! Transport abstraction: one HTTP round trip against the Grist API.
//!
//! The `Transport` trait performs a single request and hands back the status
//! and the fully drained body. It never retries and never interprets the body.
//! Remote failures (any HTTP status) are successful sends; only failures to
//! complete the exchange are errors.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use gristctl::transport::{HttpMethod, HttpTransport, Transport};
//! use gristctl::ClientConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("https://grist.example.com", "token");
//! let transport = HttpTransport::new(&config)?;
//! let response = transport.send(HttpMethod::Get, "orgs", String::new()).await?;
//! println!("{} {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```

pub mod http;

pub use http::HttpTransport;

use crate::error::GristResult;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

/// HTTP verbs used by the Grist API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the supported verbs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported HTTP method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    /// Verbs match on their canonical upper-case spelling only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(UnsupportedMethod(other.to_string())),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A single-request HTTP transport bound to one Grist server.
///
/// Implementations must be safe to share between tasks. `path` is relative to
/// the server's `/api/` root and may already carry a query string.
pub trait Transport: Send + Sync {
    /// Server root URL, without the `/api` suffix.
    fn base_url(&self) -> &str;

    /// Issue one request and return its status and body.
    ///
    /// # Errors
    ///
    /// * `GristError::Transport` when the server cannot be reached or the
    ///   exchange breaks down
    /// * `GristError::Timeout` when the client timeout elapses
    /// * `GristError::InvalidRequest` when the request cannot be built
    fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: String,
    ) -> impl Future<Output = GristResult<RawResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!("post".parse::<HttpMethod>().is_err());
        assert!("OPTIONS".parse::<HttpMethod>().is_err());
        assert!("".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_method_display_round_trip() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Patch,
            HttpMethod::Put,
            HttpMethod::Delete,
        ] {
            assert_eq!(method.to_string().parse::<HttpMethod>().unwrap(), method);
        }
    }
}
