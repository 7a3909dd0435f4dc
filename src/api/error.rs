//! Error types exposed by the API client, catalog, and listing layers.

use thiserror::Error;

/// Coarse classification used by front ends to decide how a failure is shown.
///
/// Network and validation failures are rendered as inline messages, while a
/// not-found failure gets a dedicated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never completed or the API answered with a non-2xx status.
    NetworkFailure,
    /// Client-side checks rejected the input before anything was sent.
    ValidationFailure,
    /// A slug, category, or resource lookup missed.
    NotFound,
    /// Local problems: configuration, malformed input, or I/O.
    Local,
}

/// Errors surfaced while talking to the content API or reading local content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failed before a response arrived.
    #[error("network error talking to the API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    Status {
        /// HTTP status code returned by the API.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The API rejected the configured key.
    #[error("API rejected the credentials: {message}")]
    Authentication {
        /// Detail returned with the 401/403 response.
        message: String,
    },

    /// A lookup by slug or identifier found nothing.
    #[error("{resource} not found")]
    NotFound {
        /// Human-readable description of the missing resource.
        resource: String,
    },

    /// Client-side validation failed; nothing was sent.
    #[error("validation failed: {}", .errors.join("; "))]
    Validation {
        /// Every failed check, in the order the checks ran.
        errors: Vec<String>,
    },

    /// A response body could not be decoded.
    #[error("API response could not be decoded: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// Page or page size parameters were out of range.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// A base URL or endpoint could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ApiError {
    /// Classifies the error for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. }
            | Self::Status { .. }
            | Self::Authentication { .. }
            | Self::Decode { .. } => ErrorKind::NetworkFailure,
            Self::Validation { .. } => ErrorKind::ValidationFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidPagination { .. }
            | Self::InvalidUrl(_)
            | Self::Configuration { .. }
            | Self::Io { .. } => ErrorKind::Local,
        }
    }

    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub(crate) fn io(error: &std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ApiError, ErrorKind};

    #[rstest]
    #[case::network(ApiError::Network { message: "reset".to_owned() }, ErrorKind::NetworkFailure)]
    #[case::status(
        ApiError::Status { status: 500, message: "boom".to_owned() },
        ErrorKind::NetworkFailure
    )]
    #[case::validation(
        ApiError::Validation { errors: vec!["Author is required".to_owned()] },
        ErrorKind::ValidationFailure
    )]
    #[case::not_found(ApiError::not_found("article `missing`"), ErrorKind::NotFound)]
    #[case::configuration(
        ApiError::Configuration { message: "missing".to_owned() },
        ErrorKind::Local
    )]
    fn kind_classifies_variants(#[case] error: ApiError, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn validation_message_joins_every_error() {
        let error = ApiError::Validation {
            errors: vec![
                "Title must be at least 5 characters long".to_owned(),
                "Author is required".to_owned(),
            ],
        };

        assert_eq!(
            error.to_string(),
            "validation failed: Title must be at least 5 characters long; Author is required"
        );
    }

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(
            ApiError::not_found("category `gaming`").to_string(),
            "category `gaming` not found"
        );
    }
}
