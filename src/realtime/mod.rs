//! # Realtime Module
//!
//! Server-pushed invalidation signals over a Socket.IO websocket.

pub mod channel;
pub mod events;
pub mod protocol;


pub use channel::RealtimeChannel;
pub use events::{RealtimeEvent, Resource};
