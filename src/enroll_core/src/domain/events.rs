use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Discriminant used to route events to their handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    UserRegistered,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::UserRegistered => f.write_str("user_registered"),
        }
    }
}

/// Emitted once a new user has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRegistered {
    pub user: User,
    pub occurred_on: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    UserRegistered(UserRegistered),
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::UserRegistered(_) => EventKind::UserRegistered,
        }
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::UserRegistered(event) => event.occurred_on,
        }
    }
}

impl From<UserRegistered> for DomainEvent {
    fn from(event: UserRegistered) -> Self {
        DomainEvent::UserRegistered(event)
    }
}
