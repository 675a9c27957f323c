// errors.rs
use astra::Response;
use thiserror::Error;

use crate::domain::MembershipError;

/// Errors originating from either the server logic
/// (routing, auth, bad input) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::NotFound(_) => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Message safe to show to the client. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound(what) => format!("{what} not found"),
            ServerError::MethodNotAllowed => "Method not allowed".to_string(),
            ServerError::BadRequest(msg) | ServerError::Unauthorized(msg) => msg.clone(),
            ServerError::DbError(_) | ServerError::InternalError => {
                "Internal server error".to_string()
            }
        }
    }
}

impl From<MembershipError> for ServerError {
    fn from(err: MembershipError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}
