use thiserror::Error;

/// Top-level error type for the `casona-store` crate.
///
/// Covers every failure mode of the PostgREST gateway: transport,
/// authentication, structured API errors, and response decoding.
/// `casona-core` maps these into domain-appropriate diagnostics.
#[derive(Debug, Error)]
pub enum StoreError {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Credential material could not be turned into a request header.
    #[error("Invalid API key: {reason}")]
    InvalidKey { reason: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Structured error from the PostgREST layer.
    #[error("Store API error (HTTP {status}): {message}")]
    Api {
        message: String,
        /// PostgREST error code (e.g., `42P01` for a missing table).
        code: Option<String>,
        status: u16,
    },

    /// Authentication rejected (bad or expired key).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body did not match the expected row shape.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A count query returned an unparseable `Content-Range` header.
    #[error("Missing or malformed Content-Range header in count response")]
    MalformedCount,
}

impl StoreError {
    /// Returns `true` if the error points at missing tables rather than
    /// bad credentials -- the schema has not been provisioned yet.
    pub fn is_missing_schema(&self) -> bool {
        match self {
            Self::Api { message, code, .. } => {
                code.as_deref() == Some("42P01")
                    || message.contains("does not exist")
                    || message.contains("schema cache")
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a transient transport failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
