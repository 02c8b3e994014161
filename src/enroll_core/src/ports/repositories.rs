use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, user::User, user_id::UserId};

// UserRepository port trait and errors
#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("A user with this email already exists")]
    EmailAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailAlreadyExists, Self::EmailAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Durable storage for users.
///
/// Implementations must keep emails unique: a `save` that would create a
/// second user with an existing email fails with
/// [`UserRepositoryError::EmailAlreadyExists`] and stores nothing.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: User) -> Result<(), UserRepositoryError>;
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;
    /// Removing an unknown id is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError>;
}
