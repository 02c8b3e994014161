pub mod registration_service;
pub mod telemetry;

pub use registration_service::{RegistrationService, configure_postgresql};
