//! The end-to-end signing and broadcast pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, Bytes};
use arc_swap::ArcSwapOption;
use cast_broadcast::{BroadcastResult, Broadcaster};
use cast_builder::{DomainResolver, MessageBuilder, ResolutionError};
use cast_registry::{ChainProvider, RegistryInterface, RelayInterface};
use cast_signer::{CastSigner, SignatureEngine};
use cast_types::{
	CastConfig, CastMessage, FeeEstimate, ResolvedVersion, SignatureOptions, SignedCast,
	TransactionIntent,
};

use crate::CastError;

/// A derived wallet address bound to the chain it was derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WalletBinding {
	wallet: Address,
	chain_id: u64,
}

/// High-level service driving the signing and broadcast pipeline.
///
/// Holds no cross-call mutable state except the memoized wallet binding.
/// That cache is populated at most once; two callers racing on an
/// uninitialized cache is accepted because the derived value is
/// deterministic in the owner address and converges regardless of which
/// write wins.
pub struct CastService {
	config: CastConfig,
	signer: Arc<dyn CastSigner>,
	registry: Arc<dyn RegistryInterface>,
	relay: Arc<dyn RelayInterface>,
	home_provider: Arc<dyn ChainProvider>,
	providers: HashMap<u64, Arc<dyn ChainProvider>>,
	builder: MessageBuilder,
	domains: DomainResolver,
	engine: SignatureEngine,
	broadcaster: Broadcaster,
	wallet_cache: ArcSwapOption<WalletBinding>,
}

impl CastService {
	/// Creates a service over the given collaborators.
	///
	/// `home_provider` must be connected to the home/control chain;
	/// `providers` maps target chain ids to their own providers.
	pub fn new(
		signer: Arc<dyn CastSigner>,
		registry: Arc<dyn RegistryInterface>,
		relay: Arc<dyn RelayInterface>,
		home_provider: Arc<dyn ChainProvider>,
		providers: HashMap<u64, Arc<dyn ChainProvider>>,
		config: CastConfig,
	) -> Self {
		Self {
			builder: MessageBuilder::new(registry.clone(), config.clone()),
			domains: DomainResolver::new(registry.clone(), config.clone()),
			engine: SignatureEngine::new(signer.clone(), registry.clone()),
			broadcaster: Broadcaster::new(relay.clone()),
			wallet_cache: ArcSwapOption::empty(),
			config,
			signer,
			registry,
			relay,
			home_provider,
			providers,
		}
	}

	/// Returns the externally-owned signer address.
	pub fn owner(&self) -> Address {
		self.signer.address()
	}

	/// Signs the intents and submits them through the relay.
	///
	/// `target_chain` may be omitted when an intent carries its own chain
	/// id. The home-chain precondition is checked before any message
	/// building occurs.
	pub async fn send_transactions(
		&self,
		intents: &[TransactionIntent],
		target_chain: Option<u64>,
		options: &SignatureOptions,
	) -> Result<BroadcastResult, CastError> {
		self.ensure_home_chain().await?;
		let chain_id = resolve_target_chain(intents, target_chain)?;
		let owner = self.owner();
		let wallet = self.wallet_address(chain_id, options.wallet_address).await?;

		let (message, version) = self
			.builder
			.build(intents, chain_id, wallet, owner, options)
			.await?;
		let envelope = self
			.sign_envelope(message, version, chain_id, wallet, owner, options)
			.await?;

		let provider = self.provider(chain_id)?;
		Ok(self.broadcaster.submit(&envelope, provider).await?)
	}

	/// Multisig variant of [`CastService::send_transactions`].
	///
	/// Resolves the wallet through the multisig derivation entrypoint and
	/// wraps the signature in the signer-keyed list form; everything else
	/// is identical to the single-signer path.
	pub async fn send_transactions_multisig(
		&self,
		intents: &[TransactionIntent],
		target_chain: Option<u64>,
		index: u32,
		options: &SignatureOptions,
	) -> Result<BroadcastResult, CastError> {
		self.ensure_home_chain().await?;
		let chain_id = resolve_target_chain(intents, target_chain)?;
		let owner = self.owner();
		let wallet = match options.wallet_address {
			Some(wallet) => wallet,
			None => self
				.registry
				.multisig_address(owner, index)
				.await
				.map_err(ResolutionError::from)?,
		};

		let message = self
			.builder
			.build_multisig(intents, chain_id, owner, index, options)
			.await?;
		let envelope = self
			.sign_envelope(
				message,
				ResolvedVersion::Multisig,
				chain_id,
				wallet,
				owner,
				options,
			)
			.await?;

		let provider = self.provider(chain_id)?;
		Ok(self.broadcaster.submit(&envelope, provider).await?)
	}

	/// Quotes the relay fee for executing the intents.
	///
	/// Builds the version-correct message but performs no signing.
	pub async fn estimate_fee(
		&self,
		intents: &[TransactionIntent],
		target_chain: Option<u64>,
		options: &SignatureOptions,
	) -> Result<FeeEstimate, CastError> {
		let chain_id = resolve_target_chain(intents, target_chain)?;
		let owner = self.owner();
		let wallet = self.wallet_address(chain_id, options.wallet_address).await?;

		let (message, _) = self
			.builder
			.build(intents, chain_id, wallet, owner, options)
			.await?;
		self.relay
			.estimate_fee(&message, owner, chain_id)
			.await
			.map_err(|e| CastError::Relay(e.to_string()))
	}

	/// Verifies a signature through the registry's static entrypoint for
	/// the given schema version.
	pub async fn verify_signature(
		&self,
		chain_id: u64,
		wallet: Address,
		version: ResolvedVersion,
		message: &CastMessage,
		signature: &Bytes,
	) -> Result<bool, CastError> {
		Ok(self
			.engine
			.verify(chain_id, wallet, version, message, signature)
			.await?)
	}

	/// Signs a built message and assembles the submission envelope.
	async fn sign_envelope(
		&self,
		message: CastMessage,
		version: ResolvedVersion,
		chain_id: u64,
		wallet: Address,
		owner: Address,
		options: &SignatureOptions,
	) -> Result<SignedCast, CastError> {
		let domain = self
			.domains
			.resolve(
				chain_id,
				wallet,
				options.domain_name.as_deref(),
				options.domain_version.as_deref(),
			)
			.await?;
		let digest = self.engine.digest(&message, &domain)?;
		let signature = self.engine.sign(&message, &domain, version).await?;

		Ok(SignedCast {
			message,
			signatures: vec![signature],
			owner,
			target_chain_id: chain_id,
			digest,
		})
	}

	/// Checks the home-chain precondition for signing.
	async fn ensure_home_chain(&self) -> Result<(), CastError> {
		let actual = self
			.home_provider
			.chain_id()
			.await
			.map_err(|e| CastError::Provider(e.to_string()))?;
		if actual != self.config.home_chain_id {
			return Err(CastError::ChainMismatch {
				expected: self.config.home_chain_id,
				actual,
			});
		}
		Ok(())
	}

	/// Resolves the wallet address, consulting the memoized binding.
	///
	/// An explicit override that differs from the cached binding
	/// invalidates the cache and is used for this call only; the next
	/// automatic call re-derives from the registry.
	async fn wallet_address(
		&self,
		chain_id: u64,
		wallet_override: Option<Address>,
	) -> Result<Address, CastError> {
		if let Some(wallet) = wallet_override {
			let cached = self.wallet_cache.load();
			let differs = cached
				.as_ref()
				.is_some_and(|b| b.wallet != wallet || b.chain_id != chain_id);
			if differs {
				self.wallet_cache.store(None);
			}
			return Ok(wallet);
		}

		if let Some(binding) = self.wallet_cache.load_full() {
			if binding.chain_id == chain_id {
				return Ok(binding.wallet);
			}
		}

		let wallet = self
			.registry
			.wallet_address(self.owner())
			.await
			.map_err(ResolutionError::from)?;
		// First writer wins; concurrent derivations converge on the same
		// value so the race is benign.
		self.wallet_cache
			.store(Some(Arc::new(WalletBinding { wallet, chain_id })));
		tracing::debug!(%wallet, chain_id, "Memoized wallet binding");
		Ok(wallet)
	}

	fn provider(&self, chain_id: u64) -> Result<Arc<dyn ChainProvider>, CastError> {
		self.providers
			.get(&chain_id)
			.cloned()
			.ok_or(CastError::NoProvider(chain_id))
	}
}

/// Picks the target chain from the argument or the intents.
fn resolve_target_chain(
	intents: &[TransactionIntent],
	target_chain: Option<u64>,
) -> Result<u64, CastError> {
	target_chain
		.or_else(|| intents.iter().find_map(|intent| intent.chain_id))
		.ok_or(CastError::MissingChainId)
}

#[cfg(test)]
mod tests;
