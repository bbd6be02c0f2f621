// Client plumbing shared by every page: config, errors, notifications, context

pub mod config;
pub mod error;
pub mod helpers;
pub mod id_generator;
pub mod notify;
pub mod state;
pub mod validation;

// Re-exports
pub use config::{ClientConfig, RealtimeConfig};
pub use error::{AuthFailure, ClientError};
pub use helpers::safe_token_log;
pub use notify::{Notification, Notifier, Variant};
pub use state::AppContext;
pub use validation::{ValidationError, ValidationResult, Validator};
