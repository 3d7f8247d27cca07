//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use chirp_core::domain::Account;
use chirp_core::ports::{AuthError, TokenClaims, TokenService};

use crate::middleware::error::{ApiError, AppError, AppResult};
use crate::state::AppState;

/// Authenticated caller, as asserted by a validated bearer token.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.claims.subject)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub claims: TokenClaims,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self { claims }
    }
}

impl Identity {
    /// The caller's account, created on first use.
    pub async fn account(&self, state: &AppState) -> AppResult<Account> {
        Ok(state.engine.accounts.ensure_account(&self.claims).await?)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    // Parse "Bearer <token>"
    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Get token service from app data
        let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
            tracing::error!("TokenService not found in app data");
            return ready(Err(ApiError::new(
                AppError::Internal("token service not configured".to_string()),
                req,
            )));
        };

        let result = bearer_token(req)
            .and_then(|token| token_service.validate_token(token))
            .map(Identity::from)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                ApiError::new(e, req)
            });

        ready(result)
    }
}
