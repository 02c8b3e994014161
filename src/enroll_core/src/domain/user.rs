use chrono::{DateTime, Utc};
use secrecy::Secret;

use super::{email::Email, name::Name, password::Password, user_id::UserId};

/// A registered user.
///
/// All parts are validated before they reach this type, and nothing can be
/// changed once the user is created.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: Name,
    email: Email,
    password: Password,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn create(
        id: UserId,
        name: Name,
        email: Email,
        password: Password,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn verify_password(&self, candidate: &Secret<String>) -> bool {
        self.password.verify(candidate)
    }
}
