use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Rate limited - please wait and retry")]
    RateLimited,

    #[error("GraphQL error: {}", .0.join(", "))]
    GraphQl(Vec<String>),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to gather entrants for event {event_id} after {attempts} attempts: {source}")]
    FetchExhausted {
        event_id: u64,
        attempts: u32,
        /// Why the last attempt failed
        source: Box<PreviewError>,
    },

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PreviewError {
    /// Whether retrying the same request after a pause can succeed.
    ///
    /// Server-side failures, dropped connections, timeouts and rate limiting
    /// qualify. Bad queries, bad credentials and malformed payloads do not.
    pub fn is_transient(&self) -> bool {
        match self {
            PreviewError::Transport(e) => e.is_timeout() || e.is_connect(),
            PreviewError::HttpStatus { status, .. } => status.is_server_error(),
            PreviewError::RateLimited => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        PreviewError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PreviewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_server_errors_are_transient() {
        let err = PreviewError::HttpStatus {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert!(err.is_transient());
        assert!(PreviewError::RateLimited.is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        let err = PreviewError::HttpStatus {
            status: StatusCode::UNAUTHORIZED,
            body: "invalid token".to_string(),
        };
        assert!(!err.is_transient());
        assert!(!PreviewError::MalformedResponse("x".into()).is_transient());
        assert!(!PreviewError::GraphQl(vec!["bad".into()]).is_transient());
    }

    #[test]
    fn test_fetch_exhausted_keeps_cause() {
        use std::error::Error as _;

        let err = PreviewError::FetchExhausted {
            event_id: 12,
            attempts: 5,
            source: Box::new(PreviewError::GraphQl(vec!["Invalid authentication token".into()])),
        };
        assert!(err.to_string().ends_with("Invalid authentication token"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_graphql_error_message_joins() {
        let err = PreviewError::GraphQl(vec!["one".into(), "two".into()]);
        assert_eq!(err.to_string(), "GraphQL error: one, two");
    }
}
