//! Response wrapper shared by all client operations.

/// Outcome of a call that reached the server.
///
/// `status` is the HTTP status returned by Grist, passed through verbatim.
/// `data` is the decoded payload on success and the operation's empty value
/// otherwise; callers tell the two apart by the status, never by inspecting
/// the data.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }

    /// Whether the server answered 200 OK.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Whether the server answered with any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map the payload, keeping the status.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            data: f(self.data),
        }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
