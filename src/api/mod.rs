//! # API Module
//!
//! Authenticated access to the back office REST API.

pub mod client;

pub use client::ApiClient;
