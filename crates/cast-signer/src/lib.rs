//! Signing module for the cast relay system.
//!
//! This crate defines the signer abstraction and the signature engine.
//! Signers declare an explicit capability rather than being structurally
//! probed: a direct-key signer signs digests locally, a delegated signer
//! answers an out-of-band typed-data request (for example a wallet
//! extension prompt). The engine dispatches on that flag, computes the
//! version-keyed EIP-712 digest, and re-verifies signatures through the
//! registry's static entrypoints.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use cast_types::{CastMessage, Domain, ResolvedVersion};
use serde::Serialize;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

mod engine;

pub use engine::{digest, struct_hash, SignatureEngine};
pub use implementations::local::LocalKeySigner;

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SignError {
	/// Error that occurs when the key-holder returned no signature.
	#[error("Signer returned no signature")]
	NoSignature,
	/// Error that occurs when a message field cannot be hashed.
	#[error("Invalid message field {field}: {reason}")]
	InvalidField { field: &'static str, reason: String },
	/// Error that occurs inside the underlying key-holder.
	#[error("Signing failed: {0}")]
	Signer(String),
	/// Error that occurs when a signing path is requested that the
	/// signer's capability does not support.
	#[error("Capability mismatch: {0}")]
	Capability(&'static str),
	/// Error that occurs during remote signature verification.
	#[error("Verification failed: {0}")]
	Verification(String),
}

/// How a signer produces signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerCapability {
	/// Holds key material and signs digests directly.
	DirectKey,
	/// Forwards typed-data requests to an out-of-band key-holder.
	Delegated,
}

/// The full typed-data payload handed to a delegated signer.
///
/// Mirrors what a wallet extension receives: domain, version selector,
/// and the canonical message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataRequest {
	pub domain: Domain,
	pub version: ResolvedVersion,
	pub message: CastMessage,
}

/// Trait defining the interface for cast signers.
///
/// Implementations override the method matching their declared
/// capability; the engine never calls the other one.
#[async_trait]
pub trait CastSigner: Send + Sync {
	/// Returns the signing path this signer supports.
	fn capability(&self) -> SignerCapability;

	/// Returns the externally-owned account address of this signer.
	fn address(&self) -> Address;

	/// Signs a 32-byte digest directly. Direct-key path.
	async fn sign_digest(&self, _digest: B256) -> Result<Bytes, SignError> {
		Err(SignError::Capability("signer does not hold key material"))
	}

	/// Requests a typed-data signature out of band. Delegated path.
	///
	/// Returns `None` when the key-holder declined or produced nothing;
	/// the engine surfaces that as [`SignError::NoSignature`].
	async fn request_signature(
		&self,
		_request: &TypedDataRequest,
	) -> Result<Option<Bytes>, SignError> {
		Err(SignError::Capability("signer has no delegated channel"))
	}
}
