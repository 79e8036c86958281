use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snip_core::ShortenerError;
use tracing::{debug, error};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request is missing data or is malformed.
    BadRequest(String),
    /// No record exists for the requested short code.
    NotFound(String),
    /// Every candidate code for the URL is taken.
    Conflict(String),
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            // unknown codes are answered like any other unusable request
            AppError::BadRequest(_) | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::Internal(message) => message,
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        match value {
            ShortenerError::EmptyInput("url") => AppError::BadRequest("No URL in request".into()),
            ShortenerError::EmptyInput(what) => AppError::BadRequest(format!("No {what} in request")),
            err @ ShortenerError::CollisionExhausted { .. } => AppError::Conflict(err.to_string()),
            err @ (ShortenerError::Persistence { .. }
            | ShortenerError::AlreadyRestored
            | ShortenerError::NotRestored
            | ShortenerError::Storage(_)) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = self.message(), "request failed");
        } else {
            debug!(status = status.as_u16(), error = self.message(), "request rejected");
        }
        (status, self.message().to_owned()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortener_errors_map_to_statuses() {
        let cases = [
            (ShortenerError::EmptyInput("url"), StatusCode::BAD_REQUEST),
            (ShortenerError::EmptyInput("short code"), StatusCode::BAD_REQUEST),
            (
                ShortenerError::CollisionExhausted {
                    url: "http://ya.ru".into(),
                    probes: 16,
                },
                StatusCode::CONFLICT,
            ),
            (
                ShortenerError::Persistence {
                    code: "lhLnJ1".into(),
                    reason: "disk full".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ShortenerError::AlreadyRestored, StatusCode::INTERNAL_SERVER_ERROR),
            (ShortenerError::NotRestored, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn empty_url_message() {
        let err = AppError::from(ShortenerError::EmptyInput("url"));
        assert_eq!(err.message(), "No URL in request");
    }
}
