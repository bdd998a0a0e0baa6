use ::thiserror::Error;

/// Reasons a pagination cursor was rejected.
///
/// These never escape a page request: a rejected cursor is reported to the
/// [`PageObserver`](crate::PageObserver) and the request restarts from the
/// first page.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CursorError {
    #[error("cursor is not valid base64")]
    InvalidEncoding,
    #[error("cursor payload is not a JSON object: {0}")]
    InvalidJson(String),
    #[error("cursor payload must hold exactly one integer-valued key")]
    UnexpectedShape,
    #[error("cursor is keyed on `{found}`, expected `{expected}`")]
    KeyMismatch { expected: String, found: String },
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be an integer, got `{value}`")]
    InvalidInteger { name: &'static str, value: String },
}
