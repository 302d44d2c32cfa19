use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while talking to the auth API. Callers showing
/// these to a person should collapse all of them into one "can't reach the
/// server" message; the variants are here for logs.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't complete the request, for example because of a DNS or
    /// connection failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server sent back something that wasn't the JSON we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server sent back a literal `null`.
    #[error("the server sent an empty reply")]
    EmptyReply,

    /// The server said the request succeeded but didn't include a token.
    #[error("the server reported success without a token")]
    MissingToken,
}
