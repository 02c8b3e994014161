mod error;
mod register_user;

pub use error::{ApiError, ErrorResponse};
pub use register_user::{RegisterUserBody, register_user};
