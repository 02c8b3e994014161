pub mod clock;
pub mod config;
pub mod events;
pub mod http;
pub mod persistence;
