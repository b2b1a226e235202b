use reqwest::StatusCode;

/// Errors that can occur while submitting the form.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The HTTP client could not be constructed.
    #[error("could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status {
        /// The response status.
        status: StatusCode,
        /// The response body as text, possibly empty.
        body: String,
    },

    /// A 2xx response whose body is not JSON.
    #[error("could not decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}
