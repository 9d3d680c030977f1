use thiserror::Error;

/// Failures talking to the Admin GraphQL API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Admin API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Top-level GraphQL `errors` array
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The body was not the shape we asked for
    #[error("Failed to parse response: {0}")]
    Decode(String),
}
