use thiserror::Error;

/// Failure modes surfaced by [`crate::api_client::UserApiClient`].
///
/// Nothing is retried or caught internally; every variant propagates straight
/// to the caller and aborts the operation that produced it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection refused, DNS failure, timeout,
    /// or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON where decoding was attempted.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field the client indexes directly (a post's `id`) was absent from
    /// the decoded structure, or had an unusable type.
    #[error("expected field `{field}` missing from response")]
    FieldMissing { field: &'static str },

    /// Writing the saved-comments file failed.
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}
