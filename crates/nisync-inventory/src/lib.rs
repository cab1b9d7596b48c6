//! # nisync Inventory
//!
//! REST client for the network inventory, implementing
//! [`nisync_core::Inventory`].

pub mod auth;
pub mod client;
pub mod wire;

pub use auth::ApiKeyAuth;
pub use client::InventoryClient;
