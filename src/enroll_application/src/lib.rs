pub mod dto;
pub mod use_cases;

pub use dto::user_response::UserResponse;
pub use use_cases::register_user::{
    DispatchFailurePolicy, RegisterUserError, RegisterUserRequest, RegisterUserUseCase,
};
