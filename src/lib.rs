//! Back office client for the coffee shop API.
//!
//! Pages (dashboard, inventory, orders, users, reports) are mounted behind a
//! session guard, hydrated over REST and kept fresh by realtime invalidation
//! signals.

pub mod api;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod pages;
pub mod realtime;
pub mod reports;
pub mod users;

pub use common::{AppContext, ClientConfig, ClientError, Notification};
pub use pages::{mount, MountedPage, PageView};
