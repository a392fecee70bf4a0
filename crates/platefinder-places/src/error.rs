use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream API answered with a non-success, non-empty-result status
    /// (e.g. `INVALID_REQUEST`, `OVER_QUERY_LIMIT`). An empty result set is
    /// not an error and never produces this variant.
    #[error("places API returned status {status}: {message}")]
    Api { status: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Why the current position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location services are disabled")]
    ServicesDisabled,

    #[error("permission to access location was denied")]
    PermissionDenied,

    #[error("location lookup failed")]
    LookupFailed,
}
