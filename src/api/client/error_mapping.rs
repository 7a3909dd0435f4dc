//! Maps transport failures and HTTP statuses onto [`ApiError`].

use reqwest::StatusCode;

use crate::api::error::ApiError;

const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ApiError {
    if error.is_decode() {
        return ApiError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }

    ApiError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_status_error(
    operation: &str,
    resource: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        return ApiError::not_found(resource);
    }

    let message =
        maybe_message.unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
    if is_auth_failure(status) {
        ApiError::Authentication {
            message: format!("{operation} failed: {message}"),
        }
    } else {
        ApiError::Status {
            status: status.as_u16(),
            message: format!("{operation} failed: {message}"),
        }
    }
}

pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> ApiError {
    ApiError::Decode {
        message: format!("{operation} returned malformed JSON: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rstest::rstest;

    use super::map_status_error;
    use crate::api::error::{ApiError, ErrorKind};

    #[test]
    fn not_found_names_the_resource() {
        let error = map_status_error("get article", "article `x`", StatusCode::NOT_FOUND, None);
        assert_eq!(error, ApiError::not_found("article `x`"));
    }

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::FORBIDDEN)]
    fn auth_statuses_map_to_authentication(#[case] status: StatusCode) {
        let error = map_status_error("create article", "articles", status, Some("bad key".to_owned()));
        assert_eq!(
            error,
            ApiError::Authentication {
                message: "create article failed: bad key".to_owned(),
            }
        );
    }

    #[test]
    fn other_statuses_fall_back_to_generic_message() {
        let error = map_status_error(
            "list articles",
            "articles",
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
        );

        assert_eq!(
            error,
            ApiError::Status {
                status: 500,
                message: "list articles failed: HTTP error! status: 500".to_owned(),
            }
        );
        assert_eq!(error.kind(), ErrorKind::NetworkFailure);
    }
}
