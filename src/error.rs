/// Errors that might occur while probing an API key.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request payload could not be serialized.
    #[error("payload encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not a valid error envelope.
    #[error("response decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// An I/O error while writing the report.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP transport error (DNS, connect, TLS, or reading the body).
    ///
    /// Status codes are not treated as errors; the service describes failures in the body.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}
