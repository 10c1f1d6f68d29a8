//! Persistence collaborators

pub mod users;

pub use users::{NewUser, UserStore};
