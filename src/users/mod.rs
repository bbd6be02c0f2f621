pub mod models;
pub mod page;
pub mod service;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::{NewUser, User, UserId};
pub use page::UsersPage;
