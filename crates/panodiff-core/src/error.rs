// ── Core error types ──
//
// User-facing errors from panodiff-core. Transport failures from the API
// crate are wrapped with the configuration snapshot they were fetching so
// the CLI can say which half of the comparison failed.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Failed to fetch {config} configuration")]
    Fetch {
        config: String,
        #[source]
        source: panodiff_api::Error,
    },

    // ── Parse errors ─────────────────────────────────────────────────
    #[error("Malformed XML: {message}")]
    Parse { message: String },

    // ── Selector errors ──────────────────────────────────────────────
    #[error("Invalid selector expression '{expr}': {reason}")]
    InvalidSelector { expr: String, reason: String },

    #[error("Selector matched nothing in the {config} configuration: {xpath}")]
    SelectorNotFound { xpath: String, config: String },
}

impl CoreError {
    pub(crate) fn from_xml(err: quick_xml::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }

    /// Returns `true` if the underlying fetch hit the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Fetch { source, .. } if source.is_timeout())
    }
}
