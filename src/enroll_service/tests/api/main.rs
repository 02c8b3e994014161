mod helpers;
mod register_user;
