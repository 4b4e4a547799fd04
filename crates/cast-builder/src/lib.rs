//! Message construction for the cast relay system.
//!
//! This crate turns caller-supplied transaction intents and options into
//! the canonical, version-correct cast message: it resolves the wallet
//! schema version, the nonce, and the EIP-712 domain, then maps intents
//! into the resolved version's action shape with documented defaults for
//! every unset option. Building performs no signing and has no side
//! effects beyond the remote reads needed for resolution.

use thiserror::Error;

/// Domain derivation.
pub mod domain;
/// Canonical message building.
pub mod message;
/// Nonce resolution.
pub mod nonce;
/// Wallet schema version resolution.
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::DomainResolver;
pub use message::MessageBuilder;
pub use nonce::NonceResolver;
pub use version::VersionResolver;

/// Errors that can occur while resolving message inputs.
///
/// Resolution failures are never retried; they surface immediately.
#[derive(Debug, Error)]
pub enum ResolutionError {
	/// A registry read failed.
	#[error("Registry lookup failed: {0}")]
	Registry(#[from] cast_registry::RegistryError),
	/// A version string could not be parsed as a semantic version.
	#[error("Invalid version string: {0}")]
	InvalidVersion(String),
}
