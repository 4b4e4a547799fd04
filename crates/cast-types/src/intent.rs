//! Caller-supplied inputs to the signing pipeline.
//!
//! A [`TransactionIntent`] describes one action the smart-contract wallet
//! should execute; [`SignatureOptions`] carries the optional knobs that
//! shape the canonical message. Both are read-only to the core: once an
//! intent list is handed to the message builder it is never mutated.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// How the wallet should execute a single action.
///
/// Encoded on the wire as a stringified integer (`"0"`, `"1"`, `"2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operation {
	/// Plain `CALL` into the target.
	#[default]
	Call,
	/// `DELEGATECALL` into the target.
	DelegateCall,
	/// Flashloan-wrapped call variant.
	FlashloanCall,
}

impl Operation {
	/// Returns the canonical wire encoding for this operation.
	pub fn as_wire(&self) -> &'static str {
		match self {
			Operation::Call => "0",
			Operation::DelegateCall => "1",
			Operation::FlashloanCall => "2",
		}
	}
}

/// A single action the wallet is being authorized to execute.
///
/// Immutable once passed to the message builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIntent {
	/// The contract or account the action targets.
	pub target: Address,
	/// Call data for the action. Defaults to empty (`0x`).
	#[serde(default)]
	pub data: Bytes,
	/// Native value forwarded with the action. Defaults to zero.
	#[serde(default)]
	pub value: U256,
	/// Execution variant. Defaults to a plain call.
	#[serde(default)]
	pub operation: Option<Operation>,
	/// Optional per-call gas hint forwarded to the relay.
	#[serde(default)]
	pub gas: Option<U256>,
	/// Optional target chain id carried on the intent itself.
	#[serde(default)]
	pub chain_id: Option<u64>,
}

impl TransactionIntent {
	/// Creates an intent with empty data, zero value, and default operation.
	pub fn new(target: Address) -> Self {
		Self {
			target,
			data: Bytes::new(),
			value: U256::ZERO,
			operation: None,
			gas: None,
			chain_id: None,
		}
	}
}

/// Optional metadata shaping the canonical message.
///
/// Every field is optional; an unset field is substituted with its
/// documented default during message building. The explicit `nonce`
/// override is a trust boundary: when present it is used verbatim and no
/// remote nonce lookup occurs. The literal `"-1"` selects a non-sequential,
/// salted nonce on the multisig path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureOptions {
	/// Free-form metadata bytes embedded in the signed message.
	pub metadata: Option<Bytes>,
	/// Referral source address.
	pub source: Option<Address>,
	/// Start of the validity window (unix seconds, decimal string).
	pub valid_after: Option<String>,
	/// End of the validity window (unix seconds, decimal string).
	pub valid_until: Option<String>,
	/// Minimum gas the relayer must forward with the cast.
	pub gas: Option<String>,
	/// Maximum gas price. Reserved; not consulted during execution.
	pub gas_price: Option<String>,
	/// Action-id selector.
	pub id: Option<String>,
	/// Explicit nonce override. `"-1"` selects a non-sequential nonce.
	pub nonce: Option<String>,
	/// Salt for non-sequential nonces. Only meaningful when `nonce == "-1"`.
	pub salt: Option<alloy_primitives::B256>,
	/// Explicit wallet address, bypassing registry derivation.
	pub wallet_address: Option<Address>,
	/// Domain separator name override.
	pub domain_name: Option<String>,
	/// Domain separator version override.
	pub domain_version: Option<String>,
}
