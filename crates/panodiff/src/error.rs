//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and distinct exit codes, so automation can tell a fetch failure
//! from a missing selector.

use miette::Diagnostic;
use thiserror::Error;

use panodiff_core::CoreError;

/// Exit codes for process termination.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────

    #[error("No API key provided")]
    #[diagnostic(
        code(panodiff::missing_api_key),
        help("Pass --api-key or set the PANO_API_KEY environment variable.")
    )]
    MissingApiKey,

    #[error("No configuration scope selected")]
    #[diagnostic(
        code(panodiff::no_selector),
        help(
            "Provide one of --device-group, --template, or --template-stack\n\
             to choose which part of the configuration to compare."
        )
    )]
    NoSelector,

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(panodiff::validation))]
    Validation { field: String, reason: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach Panorama while fetching the {config} configuration")]
    #[diagnostic(
        code(panodiff::connection_failed),
        help(
            "Check that the appliance is running and accessible.\n\
             Self-signed certificate? Use --insecure (-k) or --ca-cert."
        )
    )]
    ConnectionFailed {
        config: String,
        #[source]
        source: panodiff_api::Error,
    },

    #[error("Request for the {config} configuration timed out")]
    #[diagnostic(
        code(panodiff::timeout),
        help("Increase --timeout or check appliance responsiveness.")
    )]
    Timeout { config: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Panorama rejected the API key")]
    #[diagnostic(
        code(panodiff::auth_failed),
        help("Verify the key, or generate a fresh one with 'type=keygen'.")
    )]
    AuthFailed,

    // ── Pipeline ─────────────────────────────────────────────────────

    #[error("Selector matched nothing in the {config} configuration")]
    #[diagnostic(
        code(panodiff::selector_not_found),
        help("No element at {xpath}.\nCheck the group/template name for typos.")
    )]
    SelectorNotFound { xpath: String, config: String },

    #[error("Panorama returned malformed XML: {message}")]
    #[diagnostic(code(panodiff::parse))]
    Parse { message: String },

    #[error("Panorama API error (HTTP {status}): {body}")]
    #[diagnostic(code(panodiff::api))]
    Api { status: u16, body: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingApiKey | Self::NoSelector | Self::Validation { .. } => exit_code::USAGE,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed => exit_code::AUTH,
            Self::SelectorNotFound { .. } => exit_code::NOT_FOUND,
            Self::Parse { .. } | Self::Api { .. } => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Fetch { config, source } => match source {
                panodiff_api::Error::InvalidApiKey => CliError::AuthFailed,
                panodiff_api::Error::Api { status, body } => CliError::Api { status, body },
                source if source.is_timeout() => CliError::Timeout { config },
                source => CliError::ConnectionFailed { config, source },
            },

            CoreError::Parse { message } => CliError::Parse { message },

            CoreError::InvalidSelector { expr, reason } => CliError::Validation {
                field: format!("selector '{expr}'"),
                reason,
            },

            CoreError::SelectorNotFound { xpath, config } => {
                CliError::SelectorNotFound { xpath, config }
            }
        }
    }
}

// ── Client construction errors ───────────────────────────────────────

impl From<panodiff_api::Error> for CliError {
    fn from(err: panodiff_api::Error) -> Self {
        match err {
            panodiff_api::Error::InvalidApiKey => CliError::AuthFailed,
            panodiff_api::Error::InvalidUrl(e) => CliError::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            panodiff_api::Error::Api { status, body } => CliError::Api { status, body },
            other => CliError::ConnectionFailed {
                config: "requested".into(),
                source: other,
            },
        }
    }
}
