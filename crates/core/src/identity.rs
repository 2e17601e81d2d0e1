//! Pluggable external identity verification.

use async_trait::async_trait;

/// What the identity provider tells us about a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Stable user id at the provider; used as the initial nickname.
    pub user_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider rejected the token.
    #[error("Token rejected by identity provider")]
    InvalidToken,

    /// The provider could not be reached or answered nonsense.
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Resolves an external token to an identity. Only called when no account is
/// bound to the token yet.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<ExternalIdentity, IdentityError>;
}
