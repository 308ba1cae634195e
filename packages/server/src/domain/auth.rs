//! Bearer-token authentication interface.

use serde::{Deserialize, Serialize};

use super::{DomainError, UserId};

/// Claims carried by a verified access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id the token was issued to
    pub sub: String,
    /// Expiry as Unix seconds
    pub exp: u64,
}

impl AccessClaims {
    /// The authenticated user's id, validated as a domain value
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::new(self.sub.clone())
    }
}

/// Authentication failures that reject the connection upgrade
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no bearer token was presented")]
    MissingToken,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Token verification as seen by the upgrade handler
pub trait TokenVerifier: Send + Sync {
    /// Check the token's signature and expiry and return its claims
    fn verify(&self, token: &str) -> Result<AccessClaims, AuthError>;
}
