//! Utility functions shared across the cast relay crates.

/// EIP-712 hashing primitives.
pub mod eip712;
/// Hex string formatting helpers.
pub mod formatting;

pub use eip712::chain_salt;
pub use formatting::{with_0x_prefix, without_0x_prefix};
