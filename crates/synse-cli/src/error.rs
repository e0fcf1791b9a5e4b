//! CLI error taxonomy and the exit-code policy attached to it.

use reqwest::StatusCode;
use synse_config::ConfigError;
use thiserror::Error;

use crate::output::FormatError;

/// Exit code for a successful invocation.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for transport, configuration, decoding, and rendering failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for invalid command-line usage.
pub const EXIT_USAGE: i32 = 2;
/// Exit code for a remote 4xx error.
pub const EXIT_CLIENT_ERROR: i32 = 3;
/// Exit code for a remote 5xx error.
pub const EXIT_SERVER_ERROR: i32 = 4;
/// Exit code for any other remote status at or above 400.
pub const EXIT_UNKNOWN_STATUS: i32 = 5;

/// Map a remote HTTP error code onto a process exit code.
#[must_use]
pub const fn exit_code_for_status(http_code: u16) -> i32 {
    match http_code {
        400..=499 => EXIT_CLIENT_ERROR,
        500..=599 => EXIT_SERVER_ERROR,
        _ => EXIT_UNKNOWN_STATUS,
    }
}

/// Every way a CLI invocation can fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line was well-formed but semantically invalid.
    #[error("{0}")]
    Usage(String),
    /// The configuration could not be loaded or applied.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No response was obtained from the server.
    #[error("{message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
    /// The server answered with a status of 400 or above.
    #[error("{message}")]
    Server {
        /// HTTP code reported by the server payload, or the response status.
        http_code: u16,
        /// Message reported by the server payload, or a generic description.
        message: String,
    },
    /// A successful response body did not match the expected type.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Underlying decoder message.
        message: String,
    },
    /// A formatter rejected a value or could not render its output.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Convenience alias for functions returning a `CliError`.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub(crate) fn server(http_code: u16, message: impl Into<String>) -> Self {
        Self::Server {
            http_code,
            message: message.into(),
        }
    }

    /// Generic server failure used when the error body could not be decoded.
    pub(crate) fn server_status(status: StatusCode) -> Self {
        Self::server(status.as_u16(), format!("request failed with status {status}"))
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => EXIT_USAGE,
            Self::Server { http_code, .. } => exit_code_for_status(*http_code),
            Self::Config(_) | Self::Transport { .. } | Self::Decode { .. } | Self::Format(_) => {
                EXIT_FAILURE
            }
        }
    }

    /// HTTP code carried by a server error.
    #[must_use]
    pub const fn http_code(&self) -> Option<u16> {
        match self {
            Self::Server { http_code, .. } => Some(*http_code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes_map_to_distinct_exit_codes() {
        assert_eq!(exit_code_for_status(400), EXIT_CLIENT_ERROR);
        assert_eq!(exit_code_for_status(404), EXIT_CLIENT_ERROR);
        assert_eq!(exit_code_for_status(500), EXIT_SERVER_ERROR);
        assert_eq!(exit_code_for_status(503), EXIT_SERVER_ERROR);
        assert_eq!(exit_code_for_status(600), EXIT_UNKNOWN_STATUS);
        assert_eq!(exit_code_for_status(0), EXIT_UNKNOWN_STATUS);
        for code in [400, 500, 600] {
            let exit = exit_code_for_status(code);
            assert_ne!(exit, EXIT_SUCCESS);
            assert_ne!(exit, EXIT_FAILURE);
        }
    }

    #[test]
    fn transport_errors_use_generic_failure() {
        let err = CliError::transport("connection refused");
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert_eq!(err.http_code(), None);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn server_errors_carry_http_code() {
        let err = CliError::server(502, "bad gateway");
        assert_eq!(err.exit_code(), EXIT_SERVER_ERROR);
        assert_eq!(err.http_code(), Some(502));
        assert_eq!(err.to_string(), "bad gateway");
    }

    #[test]
    fn server_status_fallback_describes_status() {
        let err = CliError::server_status(StatusCode::NOT_FOUND);
        assert_eq!(err.http_code(), Some(404));
        assert_eq!(err.to_string(), "request failed with status 404 Not Found");
    }

    #[test]
    fn usage_errors_exit_with_usage_code() {
        assert_eq!(CliError::usage("bad flag").exit_code(), EXIT_USAGE);
    }
}
