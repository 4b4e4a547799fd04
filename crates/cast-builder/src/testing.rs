//! In-crate mock registry for resolver and builder tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use cast_registry::{RegistryError, RegistryInterface};
use cast_types::{CastMessage, DomainMetadata, ResolvedVersion};

/// Registry stub returning fixed values and counting nonce lookups.
pub(crate) struct MockRegistry {
	pub version: String,
	pub nonce: String,
	pub domain: Option<DomainMetadata>,
	pub default_domain: DomainMetadata,
	pub nonce_lookups: AtomicUsize,
}

impl Default for MockRegistry {
	fn default() -> Self {
		Self {
			version: "2.0.0".to_string(),
			nonce: "7".to_string(),
			domain: Some(DomainMetadata {
				name: "WalletCast".to_string(),
				version: "2.0.0".to_string(),
			}),
			default_domain: DomainMetadata {
				name: "WalletCastDefault".to_string(),
				version: "2.1.0".to_string(),
			},
			nonce_lookups: AtomicUsize::new(0),
		}
	}
}

#[async_trait]
impl RegistryInterface for MockRegistry {
	async fn wallet_address(&self, owner: Address) -> Result<Address, RegistryError> {
		// Deterministic derivation stand-in.
		let mut bytes = owner.into_array();
		bytes[19] ^= 0xa5;
		Ok(Address::from(bytes))
	}

	async fn multisig_address(&self, owner: Address, index: u32) -> Result<Address, RegistryError> {
		let mut bytes = owner.into_array();
		bytes[19] ^= index as u8;
		bytes[18] ^= 0x5a;
		Ok(Address::from(bytes))
	}

	async fn deployed_version(
		&self,
		_chain_id: u64,
		_wallet: Address,
	) -> Result<String, RegistryError> {
		Ok(self.version.clone())
	}

	async fn sequential_nonce(
		&self,
		_chain_id: u64,
		_owner: Address,
	) -> Result<String, RegistryError> {
		self.nonce_lookups.fetch_add(1, Ordering::SeqCst);
		Ok(self.nonce.clone())
	}

	async fn multisig_sequential_nonce(
		&self,
		_chain_id: u64,
		_owner: Address,
		_index: u32,
	) -> Result<String, RegistryError> {
		self.nonce_lookups.fetch_add(1, Ordering::SeqCst);
		Ok(self.nonce.clone())
	}

	async fn domain_metadata(
		&self,
		_chain_id: u64,
		wallet: Address,
	) -> Result<DomainMetadata, RegistryError> {
		if wallet == Address::ZERO {
			return Ok(self.default_domain.clone());
		}
		self.domain
			.clone()
			.ok_or_else(|| RegistryError::Contract("wallet not deployed".to_string()))
	}

	async fn verify(
		&self,
		_chain_id: u64,
		_wallet: Address,
		_version: ResolvedVersion,
		_message: &CastMessage,
		_signature: &Bytes,
	) -> Result<bool, RegistryError> {
		Ok(true)
	}
}
