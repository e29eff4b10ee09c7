//! Errors raised while talking to the APOD endpoint.

/// Shown when the endpoint keeps answering 429 after the retry budget is spent.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
/// Shown when an error carries no message of its own.
pub const GENERIC_LOAD_MESSAGE: &str = "Failed to load APODs";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The endpoint answered with a non-success status.
    #[error("request failed with status code {status}")]
    Status { status: u16, body: String },
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("{0}")]
    Request(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Rate limiting and server-side failures are worth another attempt.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Status { status: 429 | 500..=599, .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Status { status: 429, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self { Self::Status { status, .. } => Some(*status), _ => None }
    }

    /// Single human-readable line for the views.
    pub fn user_message(&self) -> String {
        if self.is_rate_limited() {
            return RATE_LIMIT_MESSAGE.to_string();
        }
        let msg = self.to_string();
        if msg.trim().is_empty() { GENERIC_LOAD_MESSAGE.to_string() } else { msg }
    }
}
