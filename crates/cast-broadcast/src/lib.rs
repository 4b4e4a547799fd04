//! Broadcast and confirmation for the cast relay system.
//!
//! A signed cast moves through `Built -> Signed -> Submitted` and ends in
//! either `Confirmed` or `PendingUnconfirmed`. Submission goes to the
//! relay; confirmation is checked against the target chain's own provider
//! rather than trusting the relay. If the fixed retry budget is exhausted
//! without the chain reporting the transaction, the caller gets a
//! synthesized pending record with a deferred wait capability instead of
//! an error.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::B256;
use cast_registry::{ChainProvider, RelayInterface};
use cast_types::{without_0x_prefix, SignedCast, TransactionRecord};
use thiserror::Error;

/// Fixed delay between transaction lookups after submission.
pub const LOOKUP_DELAY: Duration = Duration::from_secs(2);

/// Fixed number of delay-then-fetch attempts before giving up.
pub const LOOKUP_ATTEMPTS: u32 = 3;

/// Errors that can occur during broadcast.
///
/// Broadcast failures are terminal; only post-broadcast transaction
/// lookup is retried, and only within the fixed budget.
#[derive(Debug, Error)]
pub enum BroadcastError {
	/// The relay answered with the zero-byte sentinel.
	#[error("Relay rejected the cast")]
	Rejected,
	/// The relay returned something that is not a transaction hash.
	#[error("Malformed relay response: {0}")]
	MalformedResponse(String),
	/// Error that occurs while talking to the relay.
	#[error("Relay error: {0}")]
	Relay(String),
	/// Error that occurs while querying the target chain provider.
	#[error("Provider error: {0}")]
	Provider(String),
}

/// A transaction the chain has not reported yet.
///
/// Carries the zero-valued placeholder record plus the deferred wait
/// capability: `wait` blocks until the target chain's provider reports
/// the requested confirmation depth for the hash.
pub struct PendingTransaction {
	/// Placeholder record: hash, owner, and chain id are real, the rest
	/// is zero-valued.
	pub record: TransactionRecord,
	provider: Arc<dyn ChainProvider>,
}

impl PendingTransaction {
	/// Blocks until the transaction reaches the given confirmation depth.
	pub async fn wait(&self, confirmations: u64) -> Result<TransactionRecord, BroadcastError> {
		self.provider
			.wait_for_confirmation(self.record.hash, confirmations)
			.await
			.map_err(|e| BroadcastError::Provider(e.to_string()))
	}
}

impl std::fmt::Debug for PendingTransaction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PendingTransaction")
			.field("record", &self.record)
			.finish_non_exhaustive()
	}
}

/// Terminal states of one broadcast.
#[derive(Debug)]
pub enum BroadcastResult {
	/// The target chain reported the transaction within the retry budget.
	Confirmed(TransactionRecord),
	/// The retry budget ran out; not an error, completion is deferred.
	PendingUnconfirmed(PendingTransaction),
}

/// Submits signed casts and reconciles them with the target chain.
pub struct Broadcaster {
	relay: Arc<dyn RelayInterface>,
}

impl Broadcaster {
	pub fn new(relay: Arc<dyn RelayInterface>) -> Self {
		Self { relay }
	}

	/// Submits a signed cast and polls the target chain for the result.
	///
	/// The zero-byte sentinel from the relay is a terminal failure. After
	/// a hash comes back, the provider is polled `LOOKUP_ATTEMPTS` times
	/// with a fixed `LOOKUP_DELAY` before each fetch; exhaustion yields a
	/// `PendingUnconfirmed` result rather than an error.
	pub async fn submit(
		&self,
		envelope: &SignedCast,
		provider: Arc<dyn ChainProvider>,
	) -> Result<BroadcastResult, BroadcastError> {
		let response = self
			.relay
			.broadcast(envelope)
			.await
			.map_err(|e| BroadcastError::Relay(e.to_string()))?;

		let hash = parse_relay_hash(&response)?;
		tracing::info!(
			tx_hash = %hash,
			chain_id = envelope.target_chain_id,
			owner = %envelope.owner,
			"Submitted cast to relay"
		);

		for attempt in 1..=LOOKUP_ATTEMPTS {
			tokio::time::sleep(LOOKUP_DELAY).await;
			match provider.transaction_by_hash(hash).await {
				Ok(Some(record)) => {
					tracing::info!(tx_hash = %hash, attempt, "Transaction confirmed on target chain");
					return Ok(BroadcastResult::Confirmed(record));
				}
				Ok(None) => {
					tracing::debug!(tx_hash = %hash, attempt, "Transaction not yet visible");
				}
				Err(e) => {
					tracing::debug!(tx_hash = %hash, attempt, error = %e, "Transaction lookup failed");
				}
			}
		}

		tracing::info!(tx_hash = %hash, "Lookup budget exhausted, returning pending record");
		Ok(BroadcastResult::PendingUnconfirmed(PendingTransaction {
			record: TransactionRecord::placeholder(
				hash,
				envelope.owner,
				envelope.target_chain_id,
			),
			provider,
		}))
	}
}

/// Parses the relay's broadcast response into a transaction hash.
///
/// The zero-byte sentinel (`"0x"` or empty) is a terminal rejection.
fn parse_relay_hash(response: &str) -> Result<B256, BroadcastError> {
	let stripped = without_0x_prefix(response.trim());
	if stripped.is_empty() {
		return Err(BroadcastError::Rejected);
	}
	let bytes = hex::decode(stripped)
		.map_err(|_| BroadcastError::MalformedResponse(response.to_string()))?;
	if bytes.len() != 32 {
		return Err(BroadcastError::MalformedResponse(response.to_string()));
	}
	Ok(B256::from_slice(&bytes))
}
