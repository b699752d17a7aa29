//! Failure taxonomy for calls against the external query service.

use thiserror::Error;

/// Errors returned by [`crate::query_client::QueryClient`].
#[derive(Error, Debug)]
pub enum QueryError {
    /// The request never produced an HTTP response (connect, timeout, dns).
    #[error("query service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("query service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the `{ "results": [...] }` shape we expect.
    #[error("malformed query response: {0}")]
    MalformedResponse(String),

    /// The client could not be built from the configuration.
    #[error("invalid query service configuration: {0}")]
    Config(String),
}

impl QueryError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Transport failures and 5xx statuses are retried; client errors and
    /// malformed bodies would fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            QueryError::Transport(_) => true,
            QueryError::Status { status, .. } => *status >= 500,
            QueryError::MalformedResponse(_) | QueryError::Config(_) => false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for QueryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            QueryError::MalformedResponse(error.to_string())
        } else if let Some(status) = error.status() {
            QueryError::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            QueryError::Transport(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        let server = QueryError::Status {
            status: 503,
            body: String::new(),
        };
        let client = QueryError::Status {
            status: 401,
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
        assert!(QueryError::Transport("refused".into()).is_retryable());
        assert!(!QueryError::MalformedResponse("no results".into()).is_retryable());
    }

    #[test]
    fn status_error_message_names_the_code() {
        let err = QueryError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "query service returned 500: boom");
    }
}
