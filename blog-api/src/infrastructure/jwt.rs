use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),

    #[error("expected {expected:?} token, got {actual:?}")]
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TokenType {
    Access,
    Refresh,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) token_type: TokenType,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct TokenPair {
    pub(crate) access: String,
    pub(crate) refresh: String,
}

pub(crate) struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_ACCESS_TTL_SECONDS: i64 = 5 * 60;
    const DEFAULT_REFRESH_TTL_SECONDS: i64 = 24 * 60 * 60;
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str, access_ttl_seconds: i64, refresh_ttl_seconds: i64) -> Self {
        let access_ttl_seconds = if access_ttl_seconds > 0 {
            access_ttl_seconds
        } else {
            Self::DEFAULT_ACCESS_TTL_SECONDS
        };
        let refresh_ttl_seconds = if refresh_ttl_seconds > 0 {
            refresh_ttl_seconds
        } else {
            Self::DEFAULT_REFRESH_TTL_SECONDS
        };

        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    pub(crate) fn generate_pair(&self, user_id: i64, username: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access: self.generate_token(user_id, username, TokenType::Access)?,
            refresh: self.generate_token(user_id, username, TokenType::Refresh)?,
        })
    }

    pub(crate) fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        token_type: TokenType,
    ) -> Result<String, JwtError> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_seconds,
            TokenType::Refresh => self.refresh_ttl_seconds,
        };
        let now = Utc::now();

        self.encode_claims(&Claims {
            user_id,
            username: username.into(),
            token_type,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
        })
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(JwtError::Decode)?;

        if token_data.claims.token_type != expected {
            return Err(JwtError::WrongType {
                expected,
                actual: token_data.claims.token_type,
            });
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Claims, JwtError, JwtService, TokenType};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn access_token_round_trips_claims() {
        let jwt = JwtService::new(SECRET, 60, 600);
        let token = jwt
            .generate_token(7, "editor", TokenType::Access)
            .expect("token must be issued");

        let claims = jwt
            .verify_token(&token, TokenType::Access)
            .expect("token must verify");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "editor");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_is_not_accepted_as_access() {
        let jwt = JwtService::new(SECRET, 60, 600);
        let pair = jwt.generate_pair(7, "editor").expect("pair must be issued");

        let err = jwt
            .verify_token(&pair.refresh, TokenType::Access)
            .expect_err("refresh token must be rejected");
        assert!(matches!(err, JwtError::WrongType { .. }));
        assert!(jwt.verify_token(&pair.refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtService::new(SECRET, 60, 600);
        let issued = Utc::now().timestamp() - 3600;
        let token = jwt
            .encode_claims(&Claims {
                user_id: 7,
                username: "editor".to_string(),
                token_type: TokenType::Access,
                iat: issued,
                exp: issued + 60,
            })
            .expect("token must be encoded");

        let err = jwt
            .verify_token(&token, TokenType::Access)
            .expect_err("expired token must be rejected");
        assert!(matches!(err, JwtError::Decode(_)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("ffffffffffffffffffffffffffffffff", 60, 600);
        let verifier = JwtService::new(SECRET, 60, 600);
        let token = issuer
            .generate_token(7, "editor", TokenType::Access)
            .expect("token must be issued");

        assert!(verifier.verify_token(&token, TokenType::Access).is_err());
    }
}
