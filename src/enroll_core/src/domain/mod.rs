pub mod email;
pub mod events;
pub mod name;
pub mod password;
pub mod user;
pub mod user_id;
