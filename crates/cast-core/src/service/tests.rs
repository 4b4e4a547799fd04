//! End-to-end pipeline tests over in-memory collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy_primitives::{Address, Bytes, PrimitiveSignature, B256, U256};
use async_trait::async_trait;
use cast_broadcast::BroadcastResult;
use cast_registry::{
	ChainProvider, ProviderError, RegistryError, RegistryInterface, RelayError, RelayInterface,
};
use cast_signer::{CastSigner, LocalKeySigner};
use cast_types::{
	chain_salt, CastConfig, CastMessage, Domain, DomainMetadata, FeeEstimate, ResolvedVersion,
	SignatureOptions, SignedCast, TransactionIntent, TransactionRecord, DEFAULT_SOURCE,
};

use super::CastService;
use crate::CastError;

const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const HOME_CHAIN: u64 = 634;
const TARGET_CHAIN: u64 = 137;
const TX_HASH: &str = "0x2222222222222222222222222222222222222222222222222222222222222222";

/// Registry stub with call counters and a real ecrecover-based verifier.
struct MockRegistry {
	owner: Address,
	wallet: Address,
	wallet_derivations: AtomicUsize,
	lookups: AtomicUsize,
}

impl MockRegistry {
	fn new(owner: Address) -> Self {
		Self {
			owner,
			wallet: Address::repeat_byte(0x42),
			wallet_derivations: AtomicUsize::new(0),
			lookups: AtomicUsize::new(0),
		}
	}

	fn signing_domain(&self, chain_id: u64, wallet: Address) -> Domain {
		Domain {
			name: "WalletCast".to_string(),
			version: "2.0.0".to_string(),
			chain_id: HOME_CHAIN,
			verifying_contract: wallet,
			salt: chain_salt(chain_id),
		}
	}
}

#[async_trait]
impl RegistryInterface for MockRegistry {
	async fn wallet_address(&self, _owner: Address) -> Result<Address, RegistryError> {
		self.wallet_derivations.fetch_add(1, Ordering::SeqCst);
		Ok(self.wallet)
	}

	async fn multisig_address(&self, _owner: Address, index: u32) -> Result<Address, RegistryError> {
		let mut bytes = self.wallet.into_array();
		bytes[0] = index as u8;
		Ok(Address::from(bytes))
	}

	async fn deployed_version(
		&self,
		_chain_id: u64,
		_wallet: Address,
	) -> Result<String, RegistryError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		Ok("2.0.0".to_string())
	}

	async fn sequential_nonce(
		&self,
		_chain_id: u64,
		_owner: Address,
	) -> Result<String, RegistryError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		Ok("7".to_string())
	}

	async fn multisig_sequential_nonce(
		&self,
		_chain_id: u64,
		_owner: Address,
		_index: u32,
	) -> Result<String, RegistryError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		Ok("7".to_string())
	}

	async fn domain_metadata(
		&self,
		_chain_id: u64,
		_wallet: Address,
	) -> Result<DomainMetadata, RegistryError> {
		Ok(DomainMetadata {
			name: "WalletCast".to_string(),
			version: "2.0.0".to_string(),
		})
	}

	async fn verify(
		&self,
		chain_id: u64,
		wallet: Address,
		_version: ResolvedVersion,
		message: &CastMessage,
		signature: &Bytes,
	) -> Result<bool, RegistryError> {
		let domain = self.signing_domain(chain_id, wallet);
		let digest = cast_signer::digest(message, &domain)
			.map_err(|e| RegistryError::Contract(e.to_string()))?;
		let signature = PrimitiveSignature::try_from(signature.as_ref())
			.map_err(|e| RegistryError::Contract(e.to_string()))?;
		let recovered = signature
			.recover_address_from_prehash(&digest)
			.map_err(|e| RegistryError::Contract(e.to_string()))?;
		Ok(recovered == self.owner)
	}
}

struct MockRelay {
	response: String,
	last_envelope: Mutex<Option<SignedCast>>,
}

impl MockRelay {
	fn new(response: &str) -> Self {
		Self {
			response: response.to_string(),
			last_envelope: Mutex::new(None),
		}
	}
}

#[async_trait]
impl RelayInterface for MockRelay {
	async fn broadcast(&self, envelope: &SignedCast) -> Result<String, RelayError> {
		*self.last_envelope.lock().unwrap() = Some(envelope.clone());
		Ok(self.response.clone())
	}

	async fn estimate_fee(
		&self,
		_message: &CastMessage,
		_owner: Address,
		_chain_id: u64,
	) -> Result<FeeEstimate, RelayError> {
		Ok(FeeEstimate {
			fee: "42000000000000".to_string(),
			multiplier: "12000000".to_string(),
			discount: None,
		})
	}
}

struct MockProvider {
	chain_id: u64,
}

#[async_trait]
impl ChainProvider for MockProvider {
	async fn chain_id(&self) -> Result<u64, ProviderError> {
		Ok(self.chain_id)
	}

	async fn transaction_by_hash(
		&self,
		hash: B256,
	) -> Result<Option<TransactionRecord>, ProviderError> {
		Ok(Some(TransactionRecord {
			hash,
			from: Address::ZERO,
			chain_id: self.chain_id,
			block_number: 10,
			nonce: 0,
			gas_used: "21000".to_string(),
			success: true,
		}))
	}

	async fn wait_for_confirmation(
		&self,
		hash: B256,
		_confirmations: u64,
	) -> Result<TransactionRecord, ProviderError> {
		self.transaction_by_hash(hash)
			.await
			.map(|record| record.expect("record"))
	}
}

struct Fixture {
	service: CastService,
	registry: Arc<MockRegistry>,
	relay: Arc<MockRelay>,
}

fn fixture_with(home_chain: u64, relay_response: &str) -> Fixture {
	let signer = Arc::new(LocalKeySigner::from_hex_key(TEST_KEY).unwrap());
	let registry = Arc::new(MockRegistry::new(signer.address()));
	let relay = Arc::new(MockRelay::new(relay_response));
	let home_provider = Arc::new(MockProvider {
		chain_id: home_chain,
	});
	let mut providers: HashMap<u64, Arc<dyn ChainProvider>> = HashMap::new();
	providers.insert(
		TARGET_CHAIN,
		Arc::new(MockProvider {
			chain_id: TARGET_CHAIN,
		}),
	);

	let service = CastService::new(
		signer,
		registry.clone(),
		relay.clone(),
		home_provider,
		providers,
		CastConfig::default(),
	);
	Fixture {
		service,
		registry,
		relay,
	}
}

fn fixture() -> Fixture {
	fixture_with(HOME_CHAIN, TX_HASH)
}

fn intent() -> TransactionIntent {
	TransactionIntent {
		target: Address::repeat_byte(0xaa),
		data: Bytes::from(vec![0x12, 0x34]),
		value: U256::ZERO,
		operation: None,
		gas: None,
		chain_id: Some(TARGET_CHAIN),
	}
}

#[tokio::test(start_paused = true)]
async fn chain_mismatch_precedes_any_building() {
	let fx = fixture_with(1, TX_HASH);
	let err = fx
		.service
		.send_transactions(&[intent()], None, &SignatureOptions::default())
		.await
		.unwrap_err();
	assert!(matches!(
		err,
		CastError::ChainMismatch {
			expected: HOME_CHAIN,
			actual: 1
		}
	));
	// No registry read happened before the precondition failed.
	assert_eq!(fx.registry.lookups.load(Ordering::SeqCst), 0);
	assert_eq!(fx.registry.wallet_derivations.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn missing_chain_id_is_fatal() {
	let fx = fixture();
	let no_chain = TransactionIntent::new(Address::repeat_byte(0xaa));
	let err = fx
		.service
		.send_transactions(&[no_chain], None, &SignatureOptions::default())
		.await
		.unwrap_err();
	assert!(matches!(err, CastError::MissingChainId));
}

#[tokio::test(start_paused = true)]
async fn pipeline_builds_signs_and_confirms() {
	let fx = fixture();
	let result = fx
		.service
		.send_transactions(&[intent()], None, &SignatureOptions::default())
		.await
		.unwrap();

	let record = match result {
		BroadcastResult::Confirmed(record) => record,
		other => panic!("expected confirmation, got {other:?}"),
	};
	assert_eq!(record.hash, TX_HASH.parse::<B256>().unwrap());
	assert!(record.success);

	// The relay saw a complete envelope with a cross-checkable digest.
	let envelope = fx.relay.last_envelope.lock().unwrap().clone().unwrap();
	assert_eq!(envelope.target_chain_id, TARGET_CHAIN);
	assert_eq!(envelope.owner, fx.service.owner());
	assert_eq!(envelope.signatures.len(), 1);
	assert_eq!(envelope.signatures[0].signer, fx.service.owner());

	let cast = match &envelope.message {
		CastMessage::V2(cast) => cast,
		other => panic!("expected V2 message, got {other:?}"),
	};
	assert_eq!(cast.nonce, "7");
	assert_eq!(cast.actions[0].operation, "0");
	assert_eq!(cast.params.source, DEFAULT_SOURCE);

	let domain = fx
		.registry
		.signing_domain(TARGET_CHAIN, Address::repeat_byte(0x42));
	let expected = cast_signer::digest(&envelope.message, &domain).unwrap();
	assert_eq!(envelope.digest, expected);
}

#[tokio::test(start_paused = true)]
async fn signature_round_trips_through_verification() {
	let fx = fixture();
	fx.service
		.send_transactions(&[intent()], None, &SignatureOptions::default())
		.await
		.unwrap();

	let envelope = fx.relay.last_envelope.lock().unwrap().clone().unwrap();
	let valid = fx
		.service
		.verify_signature(
			TARGET_CHAIN,
			Address::repeat_byte(0x42),
			ResolvedVersion::V2,
			&envelope.message,
			&envelope.signatures[0].signature,
		)
		.await
		.unwrap();
	assert!(valid);
}

#[tokio::test(start_paused = true)]
async fn relay_rejection_propagates_without_retry() {
	let fx = fixture_with(HOME_CHAIN, "0x");
	let err = fx
		.service
		.send_transactions(&[intent()], None, &SignatureOptions::default())
		.await
		.unwrap_err();
	assert!(matches!(
		err,
		CastError::Broadcast(cast_broadcast::BroadcastError::Rejected)
	));
}

#[tokio::test(start_paused = true)]
async fn wallet_binding_is_memoized_and_invalidated_by_override() {
	let fx = fixture();
	let options = SignatureOptions::default();

	fx.service
		.send_transactions(&[intent()], None, &options)
		.await
		.unwrap();
	fx.service
		.send_transactions(&[intent()], None, &options)
		.await
		.unwrap();
	// Second call reused the memoized binding.
	assert_eq!(fx.registry.wallet_derivations.load(Ordering::SeqCst), 1);

	// A differing override invalidates the cache for later calls.
	let overridden = SignatureOptions {
		wallet_address: Some(Address::repeat_byte(0x99)),
		..Default::default()
	};
	fx.service
		.send_transactions(&[intent()], None, &overridden)
		.await
		.unwrap();
	assert_eq!(fx.registry.wallet_derivations.load(Ordering::SeqCst), 1);

	fx.service
		.send_transactions(&[intent()], None, &options)
		.await
		.unwrap();
	assert_eq!(fx.registry.wallet_derivations.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn multisig_path_signs_the_fixed_dictionary() {
	let fx = fixture();
	let options = SignatureOptions {
		nonce: Some("-1".to_string()),
		..Default::default()
	};
	let result = fx
		.service
		.send_transactions_multisig(&[intent()], None, 0, &options)
		.await
		.unwrap();
	assert!(matches!(result, BroadcastResult::Confirmed(_)));

	let envelope = fx.relay.last_envelope.lock().unwrap().clone().unwrap();
	let cast = match &envelope.message {
		CastMessage::Multisig(cast) => cast,
		other => panic!("expected multisig message, got {other:?}"),
	};
	assert_eq!(cast.params.nonce, "-1");
	assert_eq!(cast.params.salt, alloy_primitives::B256::ZERO);
	assert_eq!(envelope.signatures[0].signer, fx.service.owner());
}

#[tokio::test(start_paused = true)]
async fn estimate_fee_builds_but_does_not_sign() {
	let fx = fixture();
	let estimate = fx
		.service
		.estimate_fee(&[intent()], None, &SignatureOptions::default())
		.await
		.unwrap();
	assert_eq!(estimate.fee, "42000000000000");
	assert_eq!(estimate.multiplier, "12000000");
	// Nothing reached the relay's broadcast entrypoint.
	assert!(fx.relay.last_envelope.lock().unwrap().is_none());
}
