//! Error types for the backend client

use thiserror::Error;

/// Errors that can occur when talking to the Rifaqui backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// A required environment variable is missing
    #[error("Missing {0} environment variable")]
    MissingEnv(&'static str),

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Rate limited - too many requests
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Unauthorized - invalid or missing API key
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// The requested row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend returned an error status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Realtime channel failed (connect, handshake, or socket I/O)
    #[error("Realtime channel failed: {0}")]
    Realtime(String),
}

impl BackendError {
    /// True when retrying the same call later could succeed
    ///
    /// Callers that want to offer a "try again" affordance can key off
    /// this; the client itself never retries.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::RateLimited | Self::Realtime(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(BackendError::RateLimited.is_transient());
        assert!(BackendError::RequestFailed("timeout".into()).is_transient());
        assert!(!BackendError::Unauthorized.is_transient());
        assert!(
            !BackendError::ApiError {
                status: 400,
                message: "conflict".into()
            }
            .is_transient()
        );
    }
}
