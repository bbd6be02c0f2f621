pub mod models;
pub mod page;
pub mod service;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::{Product, ProductId, ProductInput};
pub use page::InventoryPage;
