use enroll_core::{DomainEvent, EventHandler, EventHandlerError};

/// Writes every handled event to the tracing log.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventHandler;

#[async_trait::async_trait]
impl EventHandler for LoggingEventHandler {
    async fn handle(&self, event: &DomainEvent) -> Result<(), EventHandlerError> {
        match event {
            DomainEvent::UserRegistered(registered) => {
                tracing::info!(
                    user_id = %registered.user.id(),
                    occurred_on = %registered.occurred_on,
                    "New user registered"
                );
            }
        }
        Ok(())
    }
}
