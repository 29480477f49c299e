//! Registration and password login.

use std::sync::Arc;
use tracing::{info, warn};
use validator::ValidateEmail;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::PasswordHasher;
use serde_json::json;

/// Fields required to open an account.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Service for account registration and credential checks.
///
/// Login failures are deliberately indistinguishable: an unknown email, an
/// account without a usable password and a wrong password all return the
/// same [`AppError::Unauthorized`] after the same amount of hashing work.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Registers a new account with a hashed password.
    ///
    /// The username is set to the email and the display name to
    /// "first last".
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any field is empty or the email is
    /// malformed.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let Registration {
            first_name,
            last_name,
            email,
            password,
        } = registration;

        let email = email.trim().to_string();
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();

        if first_name.is_empty() || last_name.is_empty() || email.is_empty() || password.is_empty()
        {
            return Err(AppError::bad_request("All fields are required.", json!({})));
        }

        if !email.validate_email() {
            return Err(AppError::bad_request(
                "Enter a valid email address.",
                json!({"email": email}),
            ));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered.", json!({})));
        }

        let password_hash = self.hasher.hash_blocking(password).await?;

        let user = self
            .repository
            .create(NewUser {
                name: NewUser::display_name(&first_name, &last_name),
                email,
                first_name,
                last_name,
                password_hash: Some(password_hash),
            })
            .await?;

        info!(user_id = user.id, "User registered");

        Ok(user)
    }

    /// Checks an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either field is empty.
    /// Returns [`AppError::Unauthorized`] if the credentials do not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim();

        if email.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Email and password required.",
                json!({}),
            ));
        }

        let user = self.repository.find_by_email(email).await?;

        let stored = user
            .as_ref()
            .filter(|u| u.has_usable_password())
            .and_then(|u| u.password_hash.clone());

        let verified = match stored {
            Some(encoded) => {
                self.hasher
                    .verify_blocking(password.to_string(), encoded)
                    .await?
            }
            None => {
                // Equalize timing with the known-user path.
                self.hasher.hash_blocking(password.to_string()).await?;
                false
            }
        };

        match user {
            Some(user) if verified => {
                info!(user_id = user.id, "User logged in");
                Ok(user)
            }
            _ => {
                warn!(email = %email, "Rejected login");
                Err(AppError::unauthorized("Invalid credentials.", json!({})))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::utils::password::MIN_ITERATIONS;
    use chrono::Utc;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_ITERATIONS)
    }

    fn create_test_user(id: i64, email: &str, password_hash: Option<String>) -> User {
        User {
            id,
            email: email.to_string(),
            username: email.to_string(),
            name: "Asha Rao".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            password_hash,
            date_joined: Utc::now(),
        }
    }

    fn registration(email: &str) -> Registration {
        Registration {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "asha@example.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_user| {
                new_user.email == "asha@example.com"
                    && new_user.name == "Asha Rao"
                    && new_user
                        .password_hash
                        .as_deref()
                        .is_some_and(|h| h.starts_with("pbkdf2_sha256$1000$"))
            })
            .times(1)
            .returning(|new_user| Ok(create_test_user(1, &new_user.email, new_user.password_hash)));

        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let user = service.register(registration("asha@example.com")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "asha@example.com");
        assert!(user.has_usable_password());
    }

    #[tokio::test]
    async fn test_register_missing_field() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let mut input = registration("asha@example.com");
        input.last_name = "   ".to_string();

        let err = service.register(input).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "All fields are required.");
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let err = service.register(registration("not-an-email")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(create_test_user(1, email, None))));
        mock_repo.expect_create().never();

        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let err = service.register(registration("asha@example.com")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Email already registered.");
    }

    #[tokio::test]
    async fn test_login_success() {
        let h = hasher();
        let encoded = h.hash("s3cret-pass");

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(move |email| Ok(Some(create_test_user(7, email, Some(encoded.clone())))));

        let service = AuthService::new(Arc::new(mock_repo), h);

        let user = service.login("asha@example.com", "s3cret-pass").await.unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let h = hasher();
        let encoded = h.hash("s3cret-pass");

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(move |email| Ok(Some(create_test_user(7, email, Some(encoded.clone())))));

        let service = AuthService::new(Arc::new(mock_repo), h);

        let err = service.login("asha@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert_eq!(err.to_string(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let err = service.login("ghost@example.com", "whatever").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unusable_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(create_test_user(3, email, None))));

        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let err = service.login("asha@example.com", "anything").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_locked_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(create_test_user(3, email, Some("!".to_string())))));

        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let err = service.login("asha@example.com", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service.login("asha@example.com", "!").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), hasher());

        let err = service.login("", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Email and password required.");

        let err = service.login("asha@example.com", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
