//! Broadcast envelope and transaction result types.
//!
//! These types cross the boundary between the signing pipeline and the
//! relay: a [`SignedCast`] is what gets submitted, a [`TransactionRecord`]
//! is what eventually comes back from the target chain.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::message::CastMessage;

/// One signer's contribution to a cast.
///
/// Single-signer submissions carry exactly one part; the multisig path
/// uses the same list form keyed by signer address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePart {
	/// The raw 65-byte ECDSA signature.
	pub signature: Bytes,
	/// Address of the key that produced the signature.
	pub signer: Address,
}

/// A fully signed cast ready for relay submission.
///
/// Carries the independently recomputed digest so the relay can
/// cross-check the signature without re-deriving domain parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedCast {
	/// The canonical message that was signed.
	pub message: CastMessage,
	/// Signature list, one entry per contributing signer.
	pub signatures: Vec<SignaturePart>,
	/// The externally-owned signer account.
	pub owner: Address,
	/// The chain the cast executes on.
	pub target_chain_id: u64,
	/// EIP-712 digest of `message` under the resolved domain.
	pub digest: B256,
}

/// A transaction observed (or synthesized) on the target chain.
///
/// Synthesized pending records carry the hash, owner, and chain id with
/// zero-valued placeholders for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
	/// The transaction hash reported by the relay.
	pub hash: B256,
	/// The owner the cast was signed for.
	pub from: Address,
	/// Target execution chain id.
	pub chain_id: u64,
	/// Block the transaction was included in; zero while pending.
	pub block_number: u64,
	/// Transaction nonce on the target chain; zero while pending.
	pub nonce: u64,
	/// Gas spent, as a decimal string; `"0"` while pending.
	pub gas_used: String,
	/// Whether execution succeeded; false while pending.
	pub success: bool,
}

impl TransactionRecord {
	/// Builds the zero-valued placeholder record for an unconfirmed hash.
	pub fn placeholder(hash: B256, from: Address, chain_id: u64) -> Self {
		Self {
			hash,
			from,
			chain_id,
			block_number: 0,
			nonce: 0,
			gas_used: "0".to_string(),
			success: false,
		}
	}
}

/// Relay fee quote for executing a cast.
///
/// Amounts are arbitrary-precision integers carried as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
	/// Total fee in wei.
	pub fee: String,
	/// Fee multiplier applied by the relay.
	pub multiplier: String,
	/// Optional discount applied to the fee.
	pub discount: Option<String>,
}
