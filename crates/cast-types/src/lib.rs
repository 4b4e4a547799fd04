//! Common types module for the cast relay system.
//!
//! This module defines the core data types and structures used throughout
//! the signing and broadcast pipeline. It provides a centralized location
//! for shared types to ensure consistency across all components.

/// Broadcast envelope, transaction record, and fee estimate types.
pub mod broadcast;
/// Named default/fallback configuration table.
pub mod config;
/// EIP-712 domain and domain metadata types.
pub mod domain;
/// Caller-supplied transaction intents and signing options.
pub mod intent;
/// Version-keyed canonical cast message shapes.
pub mod message;
/// Utility functions for hashing and hex formatting.
pub mod utils;

// Re-export all types for convenient access
pub use broadcast::*;
pub use config::*;
pub use domain::*;
pub use intent::*;
pub use message::*;
pub use utils::{chain_salt, with_0x_prefix, without_0x_prefix};
