//! Canonical cast message construction.
//!
//! Maps caller intents plus options into the exact field set of the
//! resolved version's type dictionary. A partial message is a contract
//! violation: every field the dictionary names is populated, with the
//! documented default where the caller left an option unset.

use std::sync::Arc;

use alloy_primitives::Address;
use cast_registry::RegistryInterface;
use cast_types::{
	ActionV1, ActionV2, CastConfig, CastMessage, CastParamsV2, CastV1, CastV2, MultisigCast,
	MultisigForwardParams, MultisigParams, ResolvedVersion, SignatureOptions, TransactionIntent,
};

use crate::{NonceResolver, ResolutionError, VersionResolver};

/// Builds version-correct canonical cast messages.
///
/// Building performs no signing; its only side effects are the nonce and
/// version reads, both skipped when the caller overrides them.
pub struct MessageBuilder {
	versions: VersionResolver,
	nonces: NonceResolver,
	config: CastConfig,
}

impl MessageBuilder {
	pub fn new(registry: Arc<dyn RegistryInterface>, config: CastConfig) -> Self {
		Self {
			versions: VersionResolver::new(registry.clone()),
			nonces: NonceResolver::new(registry),
			config,
		}
	}

	/// Builds the single-signer message for the resolved schema version.
	///
	/// Returns the message together with the version that shaped it, since
	/// verification later dispatches on the version, not the shape.
	pub async fn build(
		&self,
		intents: &[TransactionIntent],
		target_chain_id: u64,
		wallet: Address,
		owner: Address,
		options: &SignatureOptions,
	) -> Result<(CastMessage, ResolvedVersion), ResolutionError> {
		let nonce = self
			.nonces
			.resolve(target_chain_id, owner, options.nonce.as_deref())
			.await?;
		let version = self
			.versions
			.resolve(target_chain_id, wallet, options.domain_version.as_deref())
			.await?;

		let message = match version {
			ResolvedVersion::V1 => CastMessage::V1(CastV1 {
				actions: intents.iter().map(action_v1).collect(),
				valid_until: default_amount(&options.valid_until),
				gas: default_amount(&options.gas),
				source: options.source.unwrap_or(self.config.default_source),
				metadata: options.metadata.clone().unwrap_or_default(),
				nonce,
			}),
			ResolvedVersion::V2 | ResolvedVersion::V3 | ResolvedVersion::Multisig => {
				CastMessage::V2(CastV2 {
					actions: intents.iter().map(action_v2).collect(),
					params: CastParamsV2 {
						valid_until: default_amount(&options.valid_until),
						gas: default_amount(&options.gas),
						source: options.source.unwrap_or(self.config.default_source),
						id: default_amount(&options.id),
						metadata: options.metadata.clone().unwrap_or_default(),
					},
					nonce,
				})
			}
		};

		tracing::debug!(
			chain_id = target_chain_id,
			%wallet,
			version = %version,
			actions = intents.len(),
			"Built cast message"
		);
		Ok((message, version))
	}

	/// Builds the multisig message.
	///
	/// The multisig scheme has a single fixed type dictionary, so no
	/// version resolution happens on this path.
	pub async fn build_multisig(
		&self,
		intents: &[TransactionIntent],
		target_chain_id: u64,
		owner: Address,
		index: u32,
		options: &SignatureOptions,
	) -> Result<CastMessage, ResolutionError> {
		let nonce = self
			.nonces
			.resolve_multisig(target_chain_id, owner, index, options.nonce.as_deref())
			.await?;

		let message = CastMessage::Multisig(MultisigCast {
			params: MultisigParams {
				actions: intents.iter().map(action_v2).collect(),
				id: default_amount(&options.id),
				nonce,
				// Salt only disambiguates non-sequential nonces; the zero
				// default is a known gap, not a guaranteed-unique value.
				salt: options.salt.unwrap_or(self.config.default_salt),
				source: options.source.unwrap_or(self.config.default_source),
				metadata: options.metadata.clone().unwrap_or_default(),
			},
			forward_params: MultisigForwardParams {
				gas: default_amount(&options.gas),
				gas_price: default_amount(&options.gas_price),
				valid_after: default_amount(&options.valid_after),
				valid_until: default_amount(&options.valid_until),
				value: "0".to_string(),
			},
		});

		tracing::debug!(
			chain_id = target_chain_id,
			%owner,
			index,
			actions = intents.len(),
			"Built multisig cast message"
		);
		Ok(message)
	}
}

fn default_amount(value: &Option<String>) -> String {
	value.clone().unwrap_or_else(|| "0".to_string())
}

fn action_v1(intent: &TransactionIntent) -> ActionV1 {
	ActionV1 {
		target: intent.target,
		data: intent.data.clone(),
		value: intent.value.to_string(),
	}
}

fn action_v2(intent: &TransactionIntent) -> ActionV2 {
	ActionV2 {
		target: intent.target,
		data: intent.data.clone(),
		value: intent.value.to_string(),
		operation: intent.operation.unwrap_or_default().as_wire().to_string(),
	}
}
