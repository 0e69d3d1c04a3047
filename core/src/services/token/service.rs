//! Access token service implementation

use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use jt_shared::config::JwtConfig;

use crate::domain::entities::token::{AccessToken, Claims};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

/// Service for issuing and verifying JWT access tokens
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from the JWT configuration
    pub fn new(config: JwtConfig) -> Self {
        if config.is_using_default_secret() {
            tracing::warn!(
                event = "jwt_default_secret",
                "JWT secret is not configured; using the development default"
            );
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }

    /// Issue a bearer access token for `user`
    ///
    /// # Returns
    ///
    /// * `Ok(AccessToken)` - Signed token with its lifetime
    /// * `Err(DomainError::Token)` - Token generation failed
    pub fn issue_access_token(&self, user: &User) -> Result<AccessToken, DomainError> {
        let claims = Claims::new_access(
            user.id,
            &user.email,
            &self.config.issuer,
            self.config.access_token_expiry,
        );
        let token = self.encode_jwt(&claims)?;

        tracing::debug!(
            user_id = %user.id,
            event = "access_token_issued",
            "Access token issued"
        );

        Ok(AccessToken::bearer(token, self.config.access_token_expiry))
    }

    /// Verify an access token and return its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError::Token)` - Token is expired, malformed or from another issuer
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(TokenError::InvalidToken),
            })?;

        Ok(token_data.claims)
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
