use std::fmt;

/// Domain error taxonomy shared by the service layer. Handlers map each
/// variant to a status code locally; `Database` and `Payment` details are
/// logged but never sent to the client verbatim.
#[derive(Debug)]
pub enum AppError {
    Database(String),
    NotFound(String),
    InvalidRequest(String),
    Conflict(String),
    Payment(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Payment(msg) => write!(f, "Payment error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
