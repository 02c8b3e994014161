use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::events::{DomainEvent, EventKind};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct EventHandlerError(pub String);

#[derive(Debug, Error)]
pub enum EventDispatchError {
    #[error("Handler for {kind} failed: {reason}")]
    HandlerFailed { kind: EventKind, reason: String },
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Reacts to one kind of domain event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DomainEvent) -> Result<(), EventHandlerError>;
}

/// Delivers domain events to the handlers registered for their kind.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    async fn dispatch(&self, event: DomainEvent) -> Result<(), EventDispatchError>;
    async fn register(&self, kind: EventKind, handler: Arc<dyn EventHandler>);
}
