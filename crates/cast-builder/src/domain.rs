//! EIP-712 domain derivation.
//!
//! The name/version pair comes from one of three places, in order: caller
//! overrides, the deployed wallet contract itself, or the registry's
//! network-wide defaults keyed by the sentinel address. The second-to-third
//! step is a designed fallback for wallets that are not yet deployed, not
//! an error path.

use std::sync::Arc;

use alloy_primitives::Address;
use cast_registry::RegistryInterface;
use cast_types::{chain_salt, CastConfig, Domain};

use crate::ResolutionError;

/// Derives the domain-separation parameters for signing and hashing.
pub struct DomainResolver {
	registry: Arc<dyn RegistryInterface>,
	config: CastConfig,
}

impl DomainResolver {
	pub fn new(registry: Arc<dyn RegistryInterface>, config: CastConfig) -> Self {
		Self { registry, config }
	}

	/// Resolves the domain for a wallet deployment on a target chain.
	///
	/// The domain's `chainId` is pinned to the configured home/control
	/// chain; the target chain only enters through the derived salt.
	pub async fn resolve(
		&self,
		target_chain_id: u64,
		wallet: Address,
		name_override: Option<&str>,
		version_override: Option<&str>,
	) -> Result<Domain, ResolutionError> {
		let (name, version) = match (name_override, version_override) {
			(Some(name), Some(version)) => (name.to_string(), version.to_string()),
			_ => {
				let metadata = match self.registry.domain_metadata(target_chain_id, wallet).await {
					Ok(metadata) => metadata,
					Err(e) => {
						tracing::debug!(
							%wallet,
							chain_id = target_chain_id,
							error = %e,
							"Wallet domain read failed, falling back to registry default"
						);
						self.registry
							.domain_metadata(target_chain_id, self.config.registry_sentinel)
							.await?
					}
				};
				(metadata.name, metadata.version)
			}
		};

		Ok(Domain {
			name,
			version,
			chain_id: self.config.home_chain_id,
			verifying_contract: wallet,
			salt: chain_salt(target_chain_id),
		})
	}
}
