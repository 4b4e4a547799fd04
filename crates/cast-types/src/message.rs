//! Version-keyed canonical cast message shapes.
//!
//! Each wallet schema version signs a differently shaped structured message.
//! The shapes below are exact: a message's field set must match its
//! version's EIP-712 type dictionary, because that dictionary is the input
//! to the signing digest. Numeric fields travel as base-10 decimal strings,
//! the canonical on-wire form.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// The wallet schema version resolved for a deployment.
///
/// Determines the shape of the canonical message and the EIP-712 type
/// dictionary used for hashing and signing. V3 wallets share the V2
/// message shape but verify through their own registry entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedVersion {
	V1,
	V2,
	V3,
	Multisig,
}

impl std::fmt::Display for ResolvedVersion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ResolvedVersion::V1 => write!(f, "v1"),
			ResolvedVersion::V2 => write!(f, "v2"),
			ResolvedVersion::V3 => write!(f, "v3"),
			ResolvedVersion::Multisig => write!(f, "multisig"),
		}
	}
}

/// Action shape for V1 casts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionV1 {
	pub target: Address,
	pub data: Bytes,
	pub value: String,
}

/// Action shape for V2 and later casts; adds the operation selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionV2 {
	pub target: Address,
	pub data: Bytes,
	pub value: String,
	pub operation: String,
}

/// V1 cast: flat parameter layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastV1 {
	pub actions: Vec<ActionV1>,
	pub valid_until: String,
	pub gas: String,
	pub source: Address,
	pub metadata: Bytes,
	pub nonce: String,
}

/// Execution parameters grouped under `params` in V2 casts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastParamsV2 {
	pub valid_until: String,
	pub gas: String,
	pub source: Address,
	pub id: String,
	pub metadata: Bytes,
}

/// V2 cast: actions plus grouped params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastV2 {
	pub actions: Vec<ActionV2>,
	pub params: CastParamsV2,
	pub nonce: String,
}

/// Core parameters of a multisig cast.
///
/// The nonce is a signed integer; the literal `"-1"` selects a
/// non-sequential, salted nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigParams {
	pub actions: Vec<ActionV2>,
	pub id: String,
	pub nonce: String,
	pub salt: B256,
	pub source: Address,
	pub metadata: Bytes,
}

/// Relay forwarding parameters of a multisig cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigForwardParams {
	pub gas: String,
	pub gas_price: String,
	pub valid_after: String,
	pub valid_until: String,
	pub value: String,
}

/// Multisig cast: params plus forward params, no top-level actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigCast {
	pub params: MultisigParams,
	pub forward_params: MultisigForwardParams,
}

/// The canonical signed instruction bundle, tagged by schema version.
///
/// Every consumption site (hashing, signing, broadcasting, verification)
/// matches exhaustively on this enum, so adding a wallet version is a
/// compile-time-checked change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CastMessage {
	V1(CastV1),
	V2(CastV2),
	Multisig(MultisigCast),
}

impl CastMessage {
	/// Returns the nonce embedded in the message, as its wire string.
	pub fn nonce(&self) -> &str {
		match self {
			CastMessage::V1(cast) => &cast.nonce,
			CastMessage::V2(cast) => &cast.nonce,
			CastMessage::Multisig(cast) => &cast.params.nonce,
		}
	}
}
