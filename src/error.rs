use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Reader operation that triggered a resource failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Open,
    Header,
    Iterate,
    Query,
    Close,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Open => "open",
            Operation::Header => "header",
            Operation::Iterate => "iterate",
            Operation::Query => "query",
            Operation::Close => "close",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("index required but not found for {0}")]
    IndexRequired(String),

    #[error("failed to decode variant record: {0}")]
    Decode(#[source] io::Error),

    #[error("could not {operation} variant reader: {source}")]
    Resource {
        operation: Operation,
        #[source]
        source: io::Error,
    },

    #[error("unsupported locator: {0}")]
    UnsupportedLocator(String),

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn resource(operation: Operation, source: io::Error) -> Self {
        Error::Resource { operation, source }
    }

    /// Classify an error raised while pulling records from a cursor.
    ///
    /// Malformed data surfaces from noodles as `InvalidData` (or a truncated
    /// stream as `UnexpectedEof`); everything else is a failure of the handle.
    pub fn from_cursor(operation: Operation, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => Error::Decode(source),
            _ => Error::resource(operation, source),
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Error::IndexRequired(_) => "IndexRequired",
            Error::Decode(_) => "DecodeError",
            Error::Resource { .. } | Error::Io(_) => "ResourceError",
            Error::UnsupportedLocator(_) => "UnsupportedLocator",
            Error::InvalidRegion(_) => "InvalidRange",
            Error::InvalidInput(_) => "InvalidInput",
            Error::NotFound(_) => "NotFound",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::IndexRequired(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UnsupportedLocator(_) => StatusCode::BAD_REQUEST,
            Error::InvalidRegion(_) => StatusCode::BAD_REQUEST,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Resource { .. } | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub r#type: &'static str,
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                r#type: self.error_type(),
                message: self.to_string(),
            },
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_cursor_errors_split_decode_from_resource() {
        let err = Error::from_cursor(
            Operation::Iterate,
            io::Error::new(io::ErrorKind::InvalidData, "bad POS"),
        );
        assert!(matches!(err, Error::Decode(_)));

        let err = Error::from_cursor(
            Operation::Query,
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        match err {
            Error::Resource { operation, .. } => assert_eq!(operation, Operation::Query),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resource_error_keeps_cause() {
        let err = Error::resource(
            Operation::Close,
            io::Error::new(io::ErrorKind::Other, "disk gone"),
        );
        assert_eq!(err.to_string(), "could not close variant reader: disk gone");
        assert_eq!(err.source().unwrap().to_string(), "disk gone");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::IndexRequired("x.vcf".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::InvalidRegion("chr1:0".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
