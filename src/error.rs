use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttendanceError {
    #[error("no active session configured; run `rollcall configure` first")]
    MissingSession,
    #[error("invalid session column '{0}'")]
    InvalidSession(String),
    #[error("scan payload is empty")]
    EmptyPayload,
    #[error("no registration found for '{0}'")]
    UnknownId(String),
    #[error("backend error (status {status}): {message}")]
    BackendError { status: u16, message: String },
    #[error("transport error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("invalid roster row: {0}")]
    InvalidRoster(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AttendanceError>;
