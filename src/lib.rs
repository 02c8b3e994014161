//! # Enroll - User Registration Library
//!
//! Facade crate that re-exports the public APIs of the registration
//! components, so callers can depend on a single crate.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Name`, `Password`, `User`, `UserId`, `DomainEvent`
//! - **Ports**: `UserRepository`, `EventDispatcher`, `EventHandler`, `Clock`
//! - **Use cases**: `RegisterUserUseCase`
//! - **Adapters**: `PostgresUserRepository`, `HashMapUserRepository`, `InMemoryEventDispatcher`, etc.
//! - **Service**: `RegistrationService`, the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use enroll_core::*;
}

pub use enroll_core::{
    DomainEvent, Email, EmailError, EventKind, Name, NameError, Password, PasswordError, User,
    UserId, UserIdError, UserRegistered,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and event port definitions
pub mod ports {
    pub use enroll_core::{
        Clock, EventDispatchError, EventDispatcher, EventHandler, EventHandlerError,
        UserRepository, UserRepositoryError,
    };
}

pub use ports::{
    Clock, EventDispatchError, EventDispatcher, EventHandler, EventHandlerError, UserRepository,
    UserRepositoryError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use enroll_application::*;
}

pub use enroll_application::{
    DispatchFailurePolicy, RegisterUserError, RegisterUserRequest, RegisterUserUseCase,
    UserResponse,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use enroll_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use enroll_adapters::persistence::*;
    }

    /// Event dispatching
    pub mod events {
        pub use enroll_adapters::events::*;
    }

    /// Clock implementations
    pub mod clock {
        pub use enroll_adapters::clock::*;
    }

    /// Configuration
    pub mod config {
        pub use enroll_adapters::config::*;
    }
}

pub use enroll_adapters::{
    clock::{FixedClock, SystemClock},
    events::{InMemoryEventDispatcher, LoggingEventHandler},
    persistence::{HashMapUserRepository, PostgresUserRepository},
};

// ============================================================================
// Registration Service (Main Entry Point)
// ============================================================================

pub use enroll_service::{RegistrationService, configure_postgresql};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
