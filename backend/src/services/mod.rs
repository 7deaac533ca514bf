//! Business logic services for the Users API

mod user;

pub use user::UserService;
