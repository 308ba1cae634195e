//! JWT access-token verification (HS256, shared secret).

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::domain::{AccessClaims, AuthError, TokenVerifier};

/// [`TokenVerifier`] over HS256-signed JWTs.
///
/// Tokens must carry `sub` and `exp`; expiry is enforced by the decoder.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(data.claims)
    }
}
