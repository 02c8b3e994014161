pub mod in_memory_event_dispatcher;
pub mod logging_event_handler;

pub use in_memory_event_dispatcher::InMemoryEventDispatcher;
pub use logging_event_handler::LoggingEventHandler;
