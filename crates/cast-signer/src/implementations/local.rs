//! Direct-key signer backed by an in-memory private key.

use alloy_primitives::{Address, Bytes, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::{CastSigner, SignError, SignerCapability};

/// Signer that holds a raw secp256k1 key and signs digests locally.
pub struct LocalKeySigner {
	signer: PrivateKeySigner,
	address: Address,
}

impl LocalKeySigner {
	/// Creates a signer from a hex-encoded private key.
	pub fn from_hex_key(key: &str) -> Result<Self, SignError> {
		let signer: PrivateKeySigner = key
			.parse()
			.map_err(|_| SignError::Signer("Invalid private key format".to_string()))?;
		let address = signer.address();
		Ok(Self { signer, address })
	}

	/// Creates a signer from an existing alloy signer.
	pub fn new(signer: PrivateKeySigner) -> Self {
		let address = signer.address();
		Self { signer, address }
	}
}

#[async_trait]
impl CastSigner for LocalKeySigner {
	fn capability(&self) -> SignerCapability {
		SignerCapability::DirectKey
	}

	fn address(&self) -> Address {
		self.address
	}

	async fn sign_digest(&self, digest: B256) -> Result<Bytes, SignError> {
		let signature = self
			.signer
			.sign_hash(&digest)
			.await
			.map_err(|e| SignError::Signer(e.to_string()))?;
		Ok(Bytes::from(signature.as_bytes().to_vec()))
	}
}
