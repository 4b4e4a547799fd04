//! Nonce resolution.
//!
//! A caller-supplied nonce (including the `"-1"` non-sequential sentinel)
//! is a trust boundary: it is used verbatim, no remote lookup happens, and
//! the core does not validate its liveness.

use std::sync::Arc;

use alloy_primitives::Address;
use cast_registry::RegistryInterface;

use crate::ResolutionError;

/// Sentinel selecting a non-sequential, salted nonce.
pub const NON_SEQUENTIAL_NONCE: &str = "-1";

/// Fetches the next valid nonce for a wallet, honoring overrides.
pub struct NonceResolver {
	registry: Arc<dyn RegistryInterface>,
}

impl NonceResolver {
	pub fn new(registry: Arc<dyn RegistryInterface>) -> Self {
		Self { registry }
	}

	/// Resolves the sequential nonce for a single-signer wallet.
	pub async fn resolve(
		&self,
		chain_id: u64,
		owner: Address,
		nonce_override: Option<&str>,
	) -> Result<String, ResolutionError> {
		if let Some(nonce) = nonce_override {
			return Ok(nonce.to_string());
		}
		let nonce = self.registry.sequential_nonce(chain_id, owner).await?;
		tracing::debug!(chain_id, %owner, nonce = %nonce, "Resolved sequential nonce");
		Ok(nonce)
	}

	/// Resolves the sequential nonce for a multisig wallet at an index.
	pub async fn resolve_multisig(
		&self,
		chain_id: u64,
		owner: Address,
		index: u32,
		nonce_override: Option<&str>,
	) -> Result<String, ResolutionError> {
		if let Some(nonce) = nonce_override {
			return Ok(nonce.to_string());
		}
		let nonce = self
			.registry
			.multisig_sequential_nonce(chain_id, owner, index)
			.await?;
		tracing::debug!(chain_id, %owner, index, nonce = %nonce, "Resolved multisig nonce");
		Ok(nonce)
	}
}
