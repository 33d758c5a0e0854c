use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::BLANK_FIELD;
use super::error::DomainError;

/// Input of the `create-user` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateUserRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl CreateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        let password_len = self.password.chars().count();
        if !(8..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

/// Username/password pair exchanged for a token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TokenRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl TokenRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation {
                field: "username",
                message: BLANK_FIELD,
            });
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: BLANK_FIELD,
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_username(&username.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            username,
            email,
            created_at,
        })
    }
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::{CreateUserRequest, TokenRequest, User, normalize_email, normalize_username};
    use chrono::Utc;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "valid_user", "test@example.com", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Editor@Blog.EXAMPLE ").expect("must be valid");
        assert_eq!(value, "editor@blog.example");
    }

    #[test]
    fn username_length_is_bounded() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username(&"x".repeat(65)).is_err());
        assert!(normalize_username(" editor ").is_ok());
    }

    #[test]
    fn create_user_password_length_is_checked() {
        let short = CreateUserRequest {
            username: "editor".to_string(),
            email: "editor@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = CreateUserRequest {
            username: " editor ".to_string(),
            email: "Editor@Example.com".to_string(),
            password: "very-secure-password".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.username, "editor");
        assert_eq!(validated.email, "editor@example.com");
    }

    #[test]
    fn token_request_requires_both_fields() {
        let blank_user = TokenRequest {
            username: "  ".to_string(),
            password: "secret".to_string(),
        };
        assert!(blank_user.validate().is_err());

        let blank_password = TokenRequest {
            username: "editor".to_string(),
            password: String::new(),
        };
        assert!(blank_password.validate().is_err());
    }
}
