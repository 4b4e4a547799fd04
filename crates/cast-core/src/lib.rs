//! Orchestration layer of the cast relay system.
//!
//! [`CastService`] wires the resolvers, the signature engine, and the
//! broadcaster into the full signing pipeline: resolve nonce and version,
//! build the canonical message, derive the domain, sign, submit to the
//! relay, and reconcile with the target chain. Within one call, nonce
//! resolution happens-before signing happens-before submission; across
//! concurrent calls with automatic nonces no ordering is enforced, and
//! serializing them is the caller's responsibility.

use thiserror::Error;

mod service;

pub use service::CastService;

/// Top-level error taxonomy of the pipeline.
#[derive(Debug, Error)]
pub enum CastError {
	/// Version, nonce, or domain lookup failed. Not retried.
	#[error(transparent)]
	Resolution(#[from] cast_builder::ResolutionError),
	/// The key-holder failed or returned no signature. Not retried.
	#[error(transparent)]
	Signing(#[from] cast_signer::SignError),
	/// The relay rejected the cast or the submission failed. Not retried.
	#[error(transparent)]
	Broadcast(#[from] cast_broadcast::BroadcastError),
	/// The active provider is not on the home/control chain. Checked
	/// before any signing work begins.
	#[error("Active provider chain {actual} does not match home chain {expected}")]
	ChainMismatch { expected: u64, actual: u64 },
	/// No target chain id was resolvable from intents or the argument.
	#[error("No target chain id resolvable")]
	MissingChainId,
	/// No provider is configured for the target chain.
	#[error("No provider configured for chain {0}")]
	NoProvider(u64),
	/// A provider query failed outside the broadcast path.
	#[error("Provider error: {0}")]
	Provider(String),
	/// A relay call failed outside the broadcast path.
	#[error("Relay error: {0}")]
	Relay(String),
}
