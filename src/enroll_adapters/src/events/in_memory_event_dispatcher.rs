use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use enroll_core::{DomainEvent, EventDispatchError, EventDispatcher, EventHandler, EventKind};

/// Calls the handlers registered for an event's kind, in registration order,
/// on the dispatching task. The first failing handler stops the dispatch.
#[derive(Default, Clone)]
pub struct InMemoryEventDispatcher {
    handlers: Arc<RwLock<HashMap<EventKind, Vec<Arc<dyn EventHandler>>>>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl EventDispatcher for InMemoryEventDispatcher {
    #[tracing::instrument(name = "Dispatching domain event", skip_all, fields(kind = %event.kind()))]
    async fn dispatch(&self, event: DomainEvent) -> Result<(), EventDispatchError> {
        let kind = event.kind();
        let handlers = self
            .handlers
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        if handlers.is_empty() {
            tracing::debug!("No handlers registered");
            return Ok(());
        }

        for handler in handlers {
            handler
                .handle(&event)
                .await
                .map_err(|e| EventDispatchError::HandlerFailed {
                    kind,
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }

    async fn register(&self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .await
            .entry(kind)
            .or_default()
            .push(handler);
    }
}
