pub mod user_response;
