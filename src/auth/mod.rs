//! # Auth Module
//!
//! This module handles all session-related functionality including:
//! - Token persistence
//! - Session guard run before every page fetch
//! - Login/logout and route changes

pub mod models;
pub mod navigation;
pub mod service;
pub mod session;
pub mod token_store;


pub use models::{Claims, Identity};
pub use navigation::{Navigator, Route, NAV_ITEMS};
pub use session::{SessionContext, SessionGuard};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
