use actix_web::http::StatusCode;
use std::fmt;

pub const MISSING_FIELDS: &str = "Invalid body request. Missing required fields.";
pub const MALFORMED_BODY: &str = "Invalid body request. Malformed JSON.";
pub const INVALID_FIELDS: &str = "Invalid body request. Invalid field values.";
pub const INVALID_QUERY: &str = "Invalid query parameters.";
pub const INVALID_METHOD: &str = "Invalid HTTP Method";

/// Failures raised by an [`EmployeeStore`](crate::db::EmployeeStore) implementation.
#[derive(Debug)]
pub enum StoreError {
    Backend(String),
    Codec(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "Store Error: {}", msg),
            StoreError::Codec(msg) => write!(f, "Item Codec Error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Outcome of a failed operation handler.
///
/// Business-rule outcomes (`Conflict`, `NotFound`) are soft failures: they are
/// answered with 200 and `success: false`. Only `Store` maps to 500.
#[derive(Debug)]
pub enum AppError {
    MalformedBody(String),
    MissingFields(Vec<String>),
    InvalidFields(String),
    InvalidQuery(String),
    InvalidMethod(String),
    Conflict(String),
    NotFound(String),
    Store(StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedBody(_)
            | AppError::MissingFields(_)
            | AppError::InvalidFields(_)
            | AppError::InvalidQuery(_)
            | AppError::InvalidMethod(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) | AppError::NotFound(_) => StatusCode::OK,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Store failures have no message of their own,
    /// the dispatcher substitutes the operation's generic one.
    pub fn message(&self) -> Option<String> {
        match self {
            AppError::MalformedBody(_) => Some(MALFORMED_BODY.to_string()),
            AppError::MissingFields(_) => Some(MISSING_FIELDS.to_string()),
            AppError::InvalidFields(_) => Some(INVALID_FIELDS.to_string()),
            AppError::InvalidQuery(_) => Some(INVALID_QUERY.to_string()),
            AppError::InvalidMethod(_) => Some(INVALID_METHOD.to_string()),
            AppError::Conflict(msg) | AppError::NotFound(msg) => Some(msg.clone()),
            AppError::Store(_) => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MalformedBody(msg) => write!(f, "Malformed Body: {}", msg),
            AppError::MissingFields(fields) => write!(f, "Missing Fields: {}", fields.join(", ")),
            AppError::InvalidFields(msg) => write!(f, "Invalid Fields: {}", msg),
            AppError::InvalidQuery(msg) => write!(f, "Invalid Query: {}", msg),
            AppError::InvalidMethod(method) => write!(f, "Invalid Method: {}", method),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}
