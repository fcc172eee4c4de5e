use crate::{
    config::Config,
    error::{self, Error},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use entity::users::Role;
use jsonwebtoken::{
    errors::{Error as JwtError, ErrorKind},
    Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub jti: Uuid,
    pub user_id: i32,
    pub category: Role,
}

impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(error::NOT_AUTHENTICATED)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

static VALIDATION: Lazy<Validation> = Lazy::new(|| {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "iat"]);
    validation.leeway = 5;

    validation
});

/// Issues and verifies the HS256 tokens handed out by `/api/token`.
pub struct Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl Jwt {
    pub fn new(config: &Config) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_lifetime: config.access_token_lifetime,
            refresh_lifetime: config.refresh_token_lifetime,
        }
    }

    pub fn issue(
        &self,
        user_id: i32,
        category: Role,
        token_type: TokenType,
    ) -> Result<String, JwtError> {
        let lifetime = match token_type {
            TokenType::Access => self.access_lifetime,
            TokenType::Refresh => self.refresh_lifetime,
        };

        let iat = Utc::now().timestamp();
        let claims = Claims {
            token_type,
            exp: iat.saturating_add(i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX)),
            iat,
            jti: Uuid::new_v4(),
            user_id,
            category,
        };

        self.sign(&claims)
    }

    pub fn issue_pair(&self, user_id: i32, category: Role) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access: self.issue(user_id, category, TokenType::Access)?,
            refresh: self.issue(user_id, category, TokenType::Refresh)?,
        })
    }

    /// Decodes a token and checks that it is of the expected type.
    pub fn get_claims(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &VALIDATION)?.claims;

        if claims.token_type != expected {
            return Err(ErrorKind::InvalidToken.into());
        }

        Ok(claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(secret: &str) -> Jwt {
        Jwt::new(&Config::new("sqlite::memory:", secret))
    }

    #[test]
    fn access_token_round_trip() {
        let jwt = jwt("secret");
        let pair = jwt.issue_pair(7, Role::Captain).unwrap();

        let claims = jwt.get_claims(&pair.access, TokenType::Access).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.category, Role::Captain);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn token_types_are_not_interchangeable() {
        let jwt = jwt("secret");
        let pair = jwt.issue_pair(1, Role::Admin).unwrap();

        assert!(jwt.get_claims(&pair.refresh, TokenType::Access).is_err());
        assert!(jwt.get_claims(&pair.access, TokenType::Refresh).is_err());
        assert!(jwt.get_claims(&pair.refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let token = jwt("one").issue(1, Role::Player, TokenType::Access).unwrap();

        assert!(jwt("two").get_claims(&token, TokenType::Access).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = jwt("secret");
        let now = Utc::now().timestamp();
        let token = jwt
            .sign(&Claims {
                token_type: TokenType::Access,
                exp: now - 60,
                iat: now - 360,
                jti: Uuid::new_v4(),
                user_id: 1,
                category: Role::Player,
            })
            .unwrap();

        let error = jwt.get_claims(&token, TokenType::Access).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ExpiredSignature));
    }
}
