//! Wallet schema version resolution.

use std::sync::Arc;

use alloy_primitives::Address;
use cast_registry::RegistryInterface;
use cast_types::ResolvedVersion;

use crate::ResolutionError;

/// Parses the major component of a semantic version string.
///
/// Accepts an optional leading `v` and ignores everything after the first
/// dot. Malformed strings are a resolution error.
pub(crate) fn parse_major(version: &str) -> Result<u64, ResolutionError> {
	let trimmed = version.trim().trim_start_matches('v');
	let major = trimmed.split('.').next().unwrap_or(trimmed);
	major
		.parse::<u64>()
		.map_err(|_| ResolutionError::InvalidVersion(version.to_string()))
}

/// Resolves which wallet schema version applies to a deployment.
///
/// An explicit caller-supplied version string only ever selects V1 or V2:
/// V3 and the multisig scheme are reached through on-chain lookup or the
/// distinct multisig entrypoint, never through an override.
pub struct VersionResolver {
	registry: Arc<dyn RegistryInterface>,
}

impl VersionResolver {
	pub fn new(registry: Arc<dyn RegistryInterface>) -> Self {
		Self { registry }
	}

	/// Resolves the schema version for a wallet on a chain.
	///
	/// With an override, the semantic-version major component decides:
	/// major 1 is V1, anything else V2. Without one, the deployed version
	/// is read from the registry and mapped directly. The result is not
	/// cached across chains; versions are chain-specific.
	pub async fn resolve(
		&self,
		chain_id: u64,
		wallet: Address,
		version_override: Option<&str>,
	) -> Result<ResolvedVersion, ResolutionError> {
		if let Some(version) = version_override {
			let resolved = match parse_major(version)? {
				1 => ResolvedVersion::V1,
				_ => ResolvedVersion::V2,
			};
			return Ok(resolved);
		}

		let deployed = self.registry.deployed_version(chain_id, wallet).await?;
		let resolved = match parse_major(&deployed)? {
			1 => ResolvedVersion::V1,
			3 => ResolvedVersion::V3,
			_ => ResolvedVersion::V2,
		};
		tracing::debug!(chain_id, %wallet, deployed = %deployed, version = %resolved, "Resolved wallet version");
		Ok(resolved)
	}
}
