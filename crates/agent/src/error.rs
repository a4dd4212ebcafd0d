use thiserror::Error;

/// Failure modes of a single answer attempt.
///
/// The display strings double as the HTTP error detail, so they are written
/// for API callers rather than for logs.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The completion service is not fully configured. Checked per request;
    /// the server starts and serves data endpoints regardless.
    #[error("AI completion service configuration is incomplete: {0}")]
    Configuration(String),
    #[error("Question cannot be empty")]
    EmptyQuestion,
    /// Upstream answered with a non-success status. The status is replayed
    /// verbatim to the caller together with the upstream body.
    #[error("completion API error: {body}")]
    Upstream { status: u16, body: String },
    #[error("error communicating with the completion API: {0}")]
    Transport(#[source] reqwest::Error),
    /// 2xx upstream response that does not carry a first-choice message.
    #[error("completion API returned an unexpected response: {0}")]
    MalformedResponse(String),
}
