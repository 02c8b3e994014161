use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use enroll_core::{Email, User, UserId, UserRepository, UserRepositoryError};

#[derive(Default, Clone)]
pub struct HashMapUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for HashMapUserRepository {
    #[tracing::instrument(name = "Saving user in memory", skip_all)]
    async fn save(&self, user: User) -> Result<(), UserRepositoryError> {
        // Check and insert under one write lock so concurrent saves cannot
        // both claim the same email.
        let mut users = self.users.write().await;
        let email_taken = users
            .values()
            .any(|existing| existing.email() == user.email() && existing.id() != user.id());
        if email_taken {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }

        users.insert(*user.id(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email() == email).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        users.remove(id);
        Ok(())
    }
}
