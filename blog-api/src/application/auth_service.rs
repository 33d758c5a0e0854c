use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{CreateUserRequest, TokenRequest, User};
use crate::infrastructure::jwt::{JwtService, TokenPair, TokenType};

pub(crate) struct AuthService {
    repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn create_user(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        let req = req.validate()?;
        let password_hash = Self::hash_password(req.password).await?;

        self.repo
            .create_user(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await
    }

    pub(crate) async fn obtain_token_pair(
        &self,
        req: TokenRequest,
    ) -> Result<TokenPair, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_username(&req.username).await? {
            Some(user_creds) => user_creds,
            None => {
                // burn the same argon2 work as a real check
                match Self::verify_password(req.password, Self::DUMMY_PASSWORD_HASH.to_string())
                    .await
                {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        Self::verify_password(req.password, user_creds.password_hash).await?;

        self.jwt
            .generate_pair(user_creds.user.id, &user_creds.user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    /// Exchanges a refresh token for a fresh access token.
    pub(crate) fn refresh_access_token(&self, refresh_token: &str) -> Result<String, DomainError> {
        let claims = self
            .jwt
            .verify_token(refresh_token, TokenType::Refresh)
            .map_err(|_| DomainError::InvalidToken)?;

        self.jwt
            .generate_token(claims.user_id, &claims.username, TokenType::Access)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    /// Argon2 runs on the blocking pool so it never stalls the async workers.
    pub(crate) async fn hash_password(raw_password: String) -> Result<String, DomainError> {
        run_blocking(move || Self::hash_password_sync(&raw_password)).await
    }

    pub(crate) async fn verify_password(
        raw_password: String,
        password_hash: String,
    ) -> Result<(), DomainError> {
        run_blocking(move || Self::verify_password_sync(&raw_password, &password_hash)).await
    }

    fn hash_password_sync(raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    fn verify_password_sync(raw_password: &str, password_hash: &str) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, DomainError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| DomainError::Unexpected(format!("password task failed: {err}")))?
}
