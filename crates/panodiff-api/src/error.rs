use thiserror::Error;

/// Top-level error type for the `panodiff-api` crate.
///
/// Covers transport failures, URL construction, and HTTP-level rejections
/// from the Panorama XML API. `panodiff-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the appliance (401/403).
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response that is not an auth rejection. Carries the raw
    /// body so the caller can surface the appliance's own message.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },
}

impl Error {
    /// Returns `true` if this error came from the fixed request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the connection itself failed (refused, DNS, TLS).
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect(),
            Self::Tls(_) => true,
            _ => false,
        }
    }
}
