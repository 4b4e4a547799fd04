//! Version-keyed EIP-712 hashing and signing.
//!
//! Each wallet schema version has its own type dictionary; the encodeType
//! strings below carry referenced struct types appended in alphabetical
//! order, as the standard requires. The dictionary is the exact input to
//! the digest, so a field-set mismatch changes the signature value.

use std::sync::Arc;

use alloy_primitives::{keccak256, Address, Bytes, B256, I256, U256};
use cast_registry::RegistryInterface;
use cast_types::utils::eip712::{compute_final_digest, domain_hash, Eip712AbiEncoder};
use cast_types::{
	ActionV1, ActionV2, CastMessage, CastParamsV2, CastV1, CastV2, Domain, MultisigCast,
	MultisigForwardParams, MultisigParams, ResolvedVersion, SignaturePart,
};

use crate::{CastSigner, SignError, SignerCapability, TypedDataRequest};

// V1 dictionary.
const ACTION_TYPE_V1: &str = "Action(address target,bytes data,uint256 value)";
const CAST_TYPE_V1: &str = "Cast(Action[] actions,uint256 validUntil,uint256 gas,address source,bytes metadata,uint256 nonce)Action(address target,bytes data,uint256 value)";

// V2 dictionary, shared by V3 wallets.
const ACTION_TYPE_V2: &str = "Action(address target,bytes data,uint256 value,uint256 operation)";
const PARAMS_TYPE_V2: &str =
	"CastParams(uint256 validUntil,uint256 gas,address source,uint256 id,bytes metadata)";
const CAST_TYPE_V2: &str = "Cast(Action[] actions,CastParams params,uint256 nonce)Action(address target,bytes data,uint256 value,uint256 operation)CastParams(uint256 validUntil,uint256 gas,address source,uint256 id,bytes metadata)";

// Multisig dictionary, fixed (no version branching).
const MULTISIG_PARAMS_TYPE: &str = "CastParams(Action[] actions,uint256 id,int256 nonce,bytes32 salt,address source,bytes metadata)Action(address target,bytes data,uint256 value,uint256 operation)";
const MULTISIG_FORWARD_TYPE: &str =
	"CastForwardParams(uint256 gas,uint256 gasPrice,uint256 validAfter,uint256 validUntil,uint256 value)";
const MULTISIG_CAST_TYPE: &str = "Cast(CastParams params,CastForwardParams forwardParams)Action(address target,bytes data,uint256 value,uint256 operation)CastForwardParams(uint256 gas,uint256 gasPrice,uint256 validAfter,uint256 validUntil,uint256 value)CastParams(Action[] actions,uint256 id,int256 nonce,bytes32 salt,address source,bytes metadata)";

fn parse_u256(field: &'static str, value: &str) -> Result<U256, SignError> {
	U256::from_str_radix(value, 10).map_err(|e| SignError::InvalidField {
		field,
		reason: e.to_string(),
	})
}

fn parse_i256(field: &'static str, value: &str) -> Result<I256, SignError> {
	value.parse::<I256>().map_err(|e| SignError::InvalidField {
		field,
		reason: e.to_string(),
	})
}

fn hash_array(hashes: &[B256]) -> B256 {
	let mut buf = Vec::with_capacity(hashes.len() * 32);
	for hash in hashes {
		buf.extend_from_slice(hash.as_slice());
	}
	keccak256(buf)
}

fn hash_action_v1(action: &ActionV1) -> Result<B256, SignError> {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(ACTION_TYPE_V1.as_bytes()));
	enc.push_address(&action.target);
	enc.push_bytes_hashed(&action.data);
	enc.push_u256(parse_u256("value", &action.value)?);
	Ok(keccak256(enc.finish()))
}

fn hash_action_v2(action: &ActionV2) -> Result<B256, SignError> {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(ACTION_TYPE_V2.as_bytes()));
	enc.push_address(&action.target);
	enc.push_bytes_hashed(&action.data);
	enc.push_u256(parse_u256("value", &action.value)?);
	enc.push_u256(parse_u256("operation", &action.operation)?);
	Ok(keccak256(enc.finish()))
}

fn hash_actions_v2(actions: &[ActionV2]) -> Result<B256, SignError> {
	let hashes = actions
		.iter()
		.map(hash_action_v2)
		.collect::<Result<Vec<_>, _>>()?;
	Ok(hash_array(&hashes))
}

fn hash_cast_v1(cast: &CastV1) -> Result<B256, SignError> {
	let action_hashes = cast
		.actions
		.iter()
		.map(hash_action_v1)
		.collect::<Result<Vec<_>, _>>()?;

	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(CAST_TYPE_V1.as_bytes()));
	enc.push_b256(&hash_array(&action_hashes));
	enc.push_u256(parse_u256("validUntil", &cast.valid_until)?);
	enc.push_u256(parse_u256("gas", &cast.gas)?);
	enc.push_address(&cast.source);
	enc.push_bytes_hashed(&cast.metadata);
	enc.push_u256(parse_u256("nonce", &cast.nonce)?);
	Ok(keccak256(enc.finish()))
}

fn hash_params_v2(params: &CastParamsV2) -> Result<B256, SignError> {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(PARAMS_TYPE_V2.as_bytes()));
	enc.push_u256(parse_u256("validUntil", &params.valid_until)?);
	enc.push_u256(parse_u256("gas", &params.gas)?);
	enc.push_address(&params.source);
	enc.push_u256(parse_u256("id", &params.id)?);
	enc.push_bytes_hashed(&params.metadata);
	Ok(keccak256(enc.finish()))
}

fn hash_cast_v2(cast: &CastV2) -> Result<B256, SignError> {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(CAST_TYPE_V2.as_bytes()));
	enc.push_b256(&hash_actions_v2(&cast.actions)?);
	enc.push_b256(&hash_params_v2(&cast.params)?);
	enc.push_u256(parse_u256("nonce", &cast.nonce)?);
	Ok(keccak256(enc.finish()))
}

fn hash_multisig_params(params: &MultisigParams) -> Result<B256, SignError> {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(MULTISIG_PARAMS_TYPE.as_bytes()));
	enc.push_b256(&hash_actions_v2(&params.actions)?);
	enc.push_u256(parse_u256("id", &params.id)?);
	enc.push_i256(parse_i256("nonce", &params.nonce)?);
	enc.push_b256(&params.salt);
	enc.push_address(&params.source);
	enc.push_bytes_hashed(&params.metadata);
	Ok(keccak256(enc.finish()))
}

fn hash_multisig_forward(params: &MultisigForwardParams) -> Result<B256, SignError> {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(MULTISIG_FORWARD_TYPE.as_bytes()));
	enc.push_u256(parse_u256("gas", &params.gas)?);
	enc.push_u256(parse_u256("gasPrice", &params.gas_price)?);
	enc.push_u256(parse_u256("validAfter", &params.valid_after)?);
	enc.push_u256(parse_u256("validUntil", &params.valid_until)?);
	enc.push_u256(parse_u256("value", &params.value)?);
	Ok(keccak256(enc.finish()))
}

fn hash_multisig_cast(cast: &MultisigCast) -> Result<B256, SignError> {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(MULTISIG_CAST_TYPE.as_bytes()));
	enc.push_b256(&hash_multisig_params(&cast.params)?);
	enc.push_b256(&hash_multisig_forward(&cast.forward_params)?);
	Ok(keccak256(enc.finish()))
}

/// Computes the struct hash for a cast message under its own dictionary.
pub fn struct_hash(message: &CastMessage) -> Result<B256, SignError> {
	match message {
		CastMessage::V1(cast) => hash_cast_v1(cast),
		CastMessage::V2(cast) => hash_cast_v2(cast),
		CastMessage::Multisig(cast) => hash_multisig_cast(cast),
	}
}

/// Computes the final EIP-712 digest for a message under a domain.
///
/// Pure function: the same domain/message pair always yields the same
/// digest. Submitted alongside the signature so the relay can cross-check
/// without re-deriving domain parameters.
pub fn digest(message: &CastMessage, domain: &Domain) -> Result<B256, SignError> {
	Ok(compute_final_digest(
		&domain_hash(domain),
		&struct_hash(message)?,
	))
}

/// Produces and re-verifies signatures over canonical cast messages.
pub struct SignatureEngine {
	signer: Arc<dyn CastSigner>,
	registry: Arc<dyn RegistryInterface>,
}

impl SignatureEngine {
	pub fn new(signer: Arc<dyn CastSigner>, registry: Arc<dyn RegistryInterface>) -> Self {
		Self { signer, registry }
	}

	/// Returns the address of the underlying signer.
	pub fn signer_address(&self) -> Address {
		self.signer.address()
	}

	/// Computes the EIP-712 digest for a message under a domain.
	pub fn digest(&self, message: &CastMessage, domain: &Domain) -> Result<B256, SignError> {
		digest(message, domain)
	}

	/// Signs a message under a domain, dispatching on signer capability.
	///
	/// Direct-key signers sign the digest locally; delegated signers get
	/// the full typed-data payload and may decline, which surfaces as
	/// [`SignError::NoSignature`].
	pub async fn sign(
		&self,
		message: &CastMessage,
		domain: &Domain,
		version: ResolvedVersion,
	) -> Result<SignaturePart, SignError> {
		let digest = digest(message, domain)?;

		let signature = match self.signer.capability() {
			SignerCapability::DirectKey => self.signer.sign_digest(digest).await?,
			SignerCapability::Delegated => {
				let request = TypedDataRequest {
					domain: domain.clone(),
					version,
					message: message.clone(),
				};
				self.signer
					.request_signature(&request)
					.await?
					.ok_or(SignError::NoSignature)?
			}
		};

		tracing::debug!(
			signer = %self.signer.address(),
			version = %version,
			digest = %digest,
			"Signed cast message"
		);
		Ok(SignaturePart {
			signature,
			signer: self.signer.address(),
		})
	}

	/// Verifies a signature through the registry's static entrypoint for
	/// the given schema version. Always a read-only call.
	pub async fn verify(
		&self,
		chain_id: u64,
		wallet: Address,
		version: ResolvedVersion,
		message: &CastMessage,
		signature: &Bytes,
	) -> Result<bool, SignError> {
		self.registry
			.verify(chain_id, wallet, version, message, signature)
			.await
			.map_err(|e| SignError::Verification(e.to_string()))
	}
}
