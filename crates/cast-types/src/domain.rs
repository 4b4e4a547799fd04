//! EIP-712 domain types.
//!
//! The domain binds a signature to a wallet deployment. One deliberate
//! asymmetry: `chain_id` is pinned to the home/control chain, while the
//! `salt` is derived from the *target* execution chain id. A wallet signs
//! once and that signature is valid across deployments on multiple chains,
//! disambiguated only by the salt.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Domain-separation parameters used for hashing and signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
	/// Domain separator name.
	pub name: String,
	/// Semantic version string; only the major component selects the
	/// type dictionary.
	pub version: String,
	/// The home/control chain id, not the target execution chain id.
	pub chain_id: u64,
	/// The wallet address, not the relay.
	pub verifying_contract: Address,
	/// Hash of the target execution chain id.
	pub salt: B256,
}

/// Name/version pair read from a deployed wallet or the registry default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMetadata {
	pub name: String,
	pub version: String,
}
