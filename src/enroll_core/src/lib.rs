pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    events::{DomainEvent, EventKind, UserRegistered},
    name::{Name, NameError},
    password::{Password, PasswordError},
    user::User,
    user_id::{UserId, UserIdError},
};

pub use ports::{
    clock::Clock,
    events::{EventDispatchError, EventDispatcher, EventHandler, EventHandlerError},
    repositories::{UserRepository, UserRepositoryError},
};
