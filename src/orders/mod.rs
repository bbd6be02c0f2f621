pub mod draft;
pub mod models;
pub mod page;
pub mod service;

#[cfg(test)]
mod tests;

pub use draft::OrderDraft;
pub use models::{NewOrder, NewOrderItem, Order, OrderFilter, OrderId, OrderItem, OrderStatus};
pub use page::OrdersPage;
