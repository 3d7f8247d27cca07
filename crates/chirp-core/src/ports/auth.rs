//! Authentication port. Tokens are minted by an external identity provider.

/// Claims carried by a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Stable external subject id.
    pub subject: String,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    pub exp: i64,
}

/// Token validation service.
pub trait TokenService: Send + Sync {
    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
