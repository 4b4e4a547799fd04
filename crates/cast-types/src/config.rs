//! Named default/fallback configuration table.
//!
//! Every address and constant the pipeline falls back on lives here so
//! embedding hosts can override them; nothing is hard-coded at call sites.

use alloy_primitives::{Address, B256};
use serde::Deserialize;
use thiserror::Error;

/// Default referral source address substituted when options omit one.
pub const DEFAULT_SOURCE: Address = Address::with_last_byte(0x01);

/// Sentinel address the registry associates network-wide domain defaults
/// with. Querying domain metadata for this address returns the defaults.
pub const REGISTRY_SENTINEL: Address = Address::ZERO;

/// Home/control chain id used for signing-domain derivation by default.
pub const DEFAULT_HOME_CHAIN_ID: u64 = 634;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Failed to parse config: {0}")]
	Parse(String),
}

/// Pipeline configuration.
///
/// All fields have documented defaults; a `CastConfig::default()` is a
/// fully working configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CastConfig {
	/// The home/control chain id. Signing requires the active provider to
	/// report exactly this chain id.
	pub home_chain_id: u64,
	/// Referral source substituted when `SignatureOptions.source` is unset.
	pub default_source: Address,
	/// Address keying the registry's network-wide domain defaults.
	pub registry_sentinel: Address,
	/// Salt substituted for non-sequential multisig nonces when unset.
	/// Known gap: a zero salt is not a guaranteed-unique value.
	pub default_salt: B256,
	/// Confirmation depth used by the deferred wait capability.
	pub min_confirmations: u64,
}

impl Default for CastConfig {
	fn default() -> Self {
		Self {
			home_chain_id: DEFAULT_HOME_CHAIN_ID,
			default_source: DEFAULT_SOURCE,
			registry_sentinel: REGISTRY_SENTINEL,
			default_salt: B256::ZERO,
			min_confirmations: 1,
		}
	}
}

impl CastConfig {
	/// Loads a configuration from a TOML document, filling unset fields
	/// with their defaults.
	pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
		toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
	}
}
