//! Generic EIP-712 hashing primitives shared across the cast crates.
//!
//! These helpers provide:
//! - Chain-salt derivation from a target chain id
//! - Domain hash computation for the salted five-field domain
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal ABI encoder for static EIP-712 field types

use alloy_primitives::{keccak256, Address, B256, I256, U256};

use crate::domain::Domain;

/// Domain type string for the salted five-field domain.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract,bytes32 salt)";

/// Derives the domain salt for a target execution chain.
///
/// The salt is `keccak256(abi.encode(uint256 chainId))`, not the raw id:
/// it binds the signature to one execution chain even though the domain's
/// `chainId` field is pinned to the home/control chain.
pub fn chain_salt(chain_id: u64) -> B256 {
	let word: [u8; 32] = U256::from(chain_id).to_be_bytes::<32>();
	keccak256(word)
}

/// Computes the EIP-712 domain hash for a resolved [`Domain`].
pub fn domain_hash(domain: &Domain) -> B256 {
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&keccak256(DOMAIN_TYPE.as_bytes()));
	enc.push_b256(&keccak256(domain.name.as_bytes()));
	enc.push_b256(&keccak256(domain.version.as_bytes()));
	enc.push_u256(U256::from(domain.chain_id));
	enc.push_address(&domain.verifying_contract);
	enc.push_b256(&domain.salt);
	keccak256(enc.finish())
}

/// Computes the final EIP-712 digest: keccak256(0x1901 || domainHash || structHash).
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for static types used in EIP-712 struct hashing.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	/// Pushes a signed word in two's complement form.
	pub fn push_i256(&mut self, v: I256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	/// Pushes the hash of a dynamic `bytes` value, per EIP-712 encoding.
	pub fn push_bytes_hashed(&mut self, bytes: &[u8]) {
		self.push_b256(&keccak256(bytes));
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}
