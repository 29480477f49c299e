//! User account management.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for the generic user collection.
///
/// There is no authorization gate: any caller may list, edit or delete any
/// account. Accounts created here have no usable password.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({"id": id})))
    }

    /// Creates an account without a password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = self.repository.create(new_user).await?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if the new email is taken.
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        if patch.is_empty() {
            return self.get_user(id).await;
        }

        let user = self.repository.update(id, patch).await?;
        info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Deletes a user together with their properties.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("User not found", json!({"id": id})));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn create_test_user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            username: email.to_string(),
            name: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: None,
            date_joined: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));

        let err = service.get_user(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_update_reads_current() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(create_test_user(id, "a@example.com"))));
        mock_repo.expect_update().never();

        let service = UserService::new(Arc::new(mock_repo));

        let user = service.update_user(5, UserPatch::default()).await.unwrap();
        assert_eq!(user.id, 5);
    }

    #[tokio::test]
    async fn test_update_user_forwards_patch() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, patch| *id == 5 && patch.email.as_deref() == Some("b@example.com"))
            .times(1)
            .returning(|id, patch| Ok(create_test_user(id, patch.email.as_deref().unwrap_or(""))));

        let service = UserService::new(Arc::new(mock_repo));

        let patch = UserPatch {
            email: Some("b@example.com".to_string()),
            ..Default::default()
        };
        let user = service.update_user(5, patch).await.unwrap();
        assert_eq!(user.email, "b@example.com");
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(Arc::new(mock_repo));

        let err = service.delete_user(9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
