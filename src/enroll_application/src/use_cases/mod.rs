pub mod register_user;
