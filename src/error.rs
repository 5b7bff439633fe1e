//! Error types for Grist client operations.
//!
//! Only failures that happen on this side of the wire are errors. A request
//! that reaches the server and comes back with a non-2xx status is a
//! successful call carrying that status in its [`ApiResponse`](crate::ApiResponse).

use std::path::PathBuf;

/// Legacy status used for request-side failures (serialization, malformed request).
pub const STATUS_LOCAL_FAILURE: i32 = -1;
/// Legacy status used for network-level failures and timeouts.
pub const STATUS_TRANSPORT_FAILURE: i32 = -10;
/// Legacy status used when the caller cancelled the call.
pub const STATUS_CANCELLED: i32 = -20;

/// Main error type for Grist client operations.
#[derive(Debug, thiserror::Error)]
pub enum GristError {
    /// The server could not be reached or the exchange broke down
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// A deadline elapsed before the response arrived
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// The caller cancelled the operation
    #[error("Operation cancelled by caller")]
    Cancelled,

    /// JSON serialization errors on the request side
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request could not be constructed (bad URL or method)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Client configuration problems
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No base URL was configured
    #[error("Grist base URL is not configured (set GRIST_URL)")]
    MissingBaseUrl,

    /// No API token was configured
    #[error("Grist API token is not configured (set GRIST_TOKEN)")]
    MissingToken,

    /// Base URL does not look like an HTTP(S) URL
    #[error("Invalid Grist base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// Timeout value could not be parsed
    #[error("Invalid timeout value: {value}")]
    InvalidTimeout { value: String },

    /// Configuration file could not be read
    #[error("Unable to read configuration file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Home directory could not be resolved for the default config file
    #[error("Unable to locate home directory for the default configuration file")]
    NoHomeDirectory,

    /// The underlying HTTP client could not be built
    #[error("Unable to build HTTP client: {message}")]
    HttpClient { message: String },
}

impl GristError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Legacy negative status code for this error.
    ///
    /// Callers that want the `(result, status)` shape can pair this with an
    /// empty result.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => STATUS_TRANSPORT_FAILURE,
            Self::Cancelled => STATUS_CANCELLED,
            Self::Json(_) | Self::InvalidRequest { .. } | Self::Config(_) => STATUS_LOCAL_FAILURE,
        }
    }

    /// Whether the failure happened before any request left the process.
    pub fn is_local(&self) -> bool {
        self.status_code() == STATUS_LOCAL_FAILURE
    }
}

// Result type aliases for convenience
pub type GristResult<T> = Result<T, GristError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
