//! Remote collaborator interfaces for the cast relay system.
//!
//! Everything the pipeline reads from or submits to over the network is
//! behind one of the traits in this crate: the wallet registry contracts,
//! the relay's RPC surface, and the target chain's own provider. Transport,
//! provider construction, and ABI dispatch are implementation concerns of
//! whoever implements these traits; the core treats every method as an
//! opaque remote call.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use cast_types::{
	CastMessage, DomainMetadata, FeeEstimate, ResolvedVersion, SignedCast, TransactionRecord,
};
use thiserror::Error;

/// Errors that can occur during registry contract reads.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a contract read reverts or returns
	/// undecodable data.
	#[error("Contract read failed: {0}")]
	Contract(String),
}

/// Errors that can occur while talking to the relay.
#[derive(Debug, Error)]
pub enum RelayError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the relay rejects the request outright.
	#[error("Relay rejected request: {0}")]
	Rejected(String),
}

/// Errors that can occur while querying a chain provider.
#[derive(Debug, Error)]
pub enum ProviderError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a transaction lookup fails permanently.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
}

/// Read entrypoints of the wallet registry contracts.
///
/// Covers wallet-address derivation, deployed-version lookup, sequential
/// nonce counters, domain metadata, and static signature verification for
/// both the single-signer and multisig registries.
#[async_trait]
pub trait RegistryInterface: Send + Sync {
	/// Derives the single-signer wallet address for an owner.
	async fn wallet_address(&self, owner: Address) -> Result<Address, RegistryError>;

	/// Derives the multisig wallet address for an owner and index.
	async fn multisig_address(&self, owner: Address, index: u32)
		-> Result<Address, RegistryError>;

	/// Looks up the deployed wallet schema version on a chain.
	///
	/// Returns the semantic version string reported by the registry.
	async fn deployed_version(
		&self,
		chain_id: u64,
		wallet: Address,
	) -> Result<String, RegistryError>;

	/// Fetches the wallet's current sequential nonce counter.
	async fn sequential_nonce(&self, chain_id: u64, owner: Address)
		-> Result<String, RegistryError>;

	/// Fetches the multisig wallet's sequential nonce counter.
	async fn multisig_sequential_nonce(
		&self,
		chain_id: u64,
		owner: Address,
		index: u32,
	) -> Result<String, RegistryError>;

	/// Reads the domain separator name/version from a deployed wallet.
	///
	/// Fails when the wallet is not yet deployed on the chain. Passing the
	/// configured sentinel address returns the network-wide defaults
	/// instead of a per-wallet value.
	async fn domain_metadata(
		&self,
		chain_id: u64,
		wallet: Address,
	) -> Result<DomainMetadata, RegistryError>;

	/// Verifies a signature through the registry's static verification
	/// entrypoint for the given schema version.
	///
	/// Implementations MUST issue this as a read-only call; the same
	/// entrypoint has deploy-on-call side effects when executed as a
	/// state-changing transaction.
	async fn verify(
		&self,
		chain_id: u64,
		wallet: Address,
		version: ResolvedVersion,
		message: &CastMessage,
		signature: &Bytes,
	) -> Result<bool, RegistryError>;
}

/// The relay's transport-agnostic RPC surface.
#[async_trait]
pub trait RelayInterface: Send + Sync {
	/// Submits a signed cast for on-chain execution.
	///
	/// Returns the transaction hash as a hex string. The zero-byte
	/// sentinel (`"0x"`) signals terminal rejection; the caller is
	/// responsible for treating it as such.
	async fn broadcast(&self, envelope: &SignedCast) -> Result<String, RelayError>;

	/// Quotes the relay fee for executing a cast.
	async fn estimate_fee(
		&self,
		message: &CastMessage,
		owner: Address,
		chain_id: u64,
	) -> Result<FeeEstimate, RelayError>;
}

/// A target chain's own transaction provider.
///
/// Used after broadcast to confirm the relay-reported hash against the
/// chain itself rather than trusting the relay.
#[async_trait]
pub trait ChainProvider: Send + Sync {
	/// Returns the chain id the provider is connected to.
	async fn chain_id(&self) -> Result<u64, ProviderError>;

	/// Fetches a transaction by hash, or `None` if the chain does not
	/// know it yet.
	async fn transaction_by_hash(
		&self,
		hash: B256,
	) -> Result<Option<TransactionRecord>, ProviderError>;

	/// Blocks until the transaction has the requested confirmation depth.
	async fn wait_for_confirmation(
		&self,
		hash: B256,
		confirmations: u64,
	) -> Result<TransactionRecord, ProviderError>;
}
