//! Error handling middleware - uniform JSON error envelopes.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use chirp_core::error::{DomainError, RepoError};
use chirp_core::ports::AuthError;
use chirp_shared::ErrorResponse;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Operation not allowed: {0}")]
    NotAllowed(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn envelope(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(msg) => ErrorResponse::not_found(msg),
            AppError::BadRequest(msg) => ErrorResponse::bad_request(msg),
            AppError::Unauthorized(msg) => ErrorResponse::unauthorized(msg),
            AppError::Forbidden(msg) => ErrorResponse::forbidden(msg),
            AppError::Conflict(msg) => ErrorResponse::conflict(msg),
            AppError::NotAllowed(msg) => ErrorResponse::unprocessable(msg),
            AppError::Internal(detail) => {
                // Log internal errors; the client only sees a generic message
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotAllowed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::SelfActionForbidden(msg) => AppError::NotAllowed(msg),
            DomainError::NotOwner { entity_type, id } => AppError::Forbidden(format!(
                "{} {} belongs to another account",
                entity_type, id
            )),
            DomainError::ConflictRace(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        DomainError::from(err).into()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => AppError::Unauthorized(
                "Your authentication token has expired. Please login again.".to_string(),
            ),
            AuthError::InvalidToken(msg) => AppError::Unauthorized(msg),
            AuthError::MissingAuth => AppError::Unauthorized(
                "Please provide a valid Bearer token in the Authorization header.".to_string(),
            ),
        }
    }
}

/// An [`AppError`] tied to the request path it failed on.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub path: String,
}

impl ApiError {
    pub fn new(error: impl Into<AppError>, req: &HttpRequest) -> Self {
        Self {
            error: error.into(),
            path: req.path().to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.path)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.error.envelope().with_path(&self.path))
    }
}

/// Attach the request path to any error convertible into [`AppError`].
pub trait AtPath<T> {
    fn at(self, req: &HttpRequest) -> ApiResult<T>;
}

impl<T, E: Into<AppError>> AtPath<T> for Result<T, E> {
    fn at(self, req: &HttpRequest) -> ApiResult<T> {
        self.map_err(|e| ApiError::new(e, req))
    }
}

/// Result type alias for code without a request at hand.
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
