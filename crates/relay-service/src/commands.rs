//! Command implementations for the relayer binary.
//!
//! Each command returns a serializable output struct; `main` prints it as JSON.

use relay_account::{recover_relay_signer, AccountService, SigningError};
use relay_config::ConfigError;
use relay_delivery::{DeliveryError, DeliveryService};
use relay_types::{
	message_digest, relay_digest, without_0x_prefix, Address, Classification, ExecutionBudget,
	RecoverableSignature, SignatureError, TransactionHash, B256, U256,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
	/// Error that occurs when an argument cannot be parsed.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	/// Error that occurs when signing or recovery fails.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Error that occurs when a receipt cannot be fetched.
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
	/// Error that occurs when the configuration is missing or invalid.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl From<SignatureError> for CommandError {
	fn from(err: SignatureError) -> Self {
		CommandError::InvalidArgument(err.to_string())
	}
}

/// Output of the `address` command.
#[derive(Debug, Serialize)]
pub struct AddressOutput {
	pub signer: Address,
}

/// Output of the signing commands.
#[derive(Debug, Serialize)]
pub struct SignatureOutput {
	pub signer: Address,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nonce: Option<String>,
	pub digest: B256,
	pub signature: RecoverableSignature,
}

/// Output of the `recover-relay` command.
#[derive(Debug, Serialize)]
pub struct RecoverOutput {
	pub nonce: String,
	pub digest: B256,
	pub signer: Address,
}

/// Output of the `classify` command.
#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
	pub tx_hash: String,
	pub budget: ExecutionBudget,
	pub outcome: Classification,
	pub retry_with_larger_budget: bool,
}

/// Parses hex input with an optional `0x` prefix. An empty string is an empty payload.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, CommandError> {
	hex::decode(without_0x_prefix(input.trim()))
		.map_err(|e| CommandError::InvalidArgument(format!("invalid hex '{}': {}", input, e)))
}

/// Parses a nonce given in decimal or `0x`-prefixed hex.
pub fn parse_nonce(input: &str) -> Result<U256, CommandError> {
	input
		.trim()
		.parse::<U256>()
		.map_err(|e| CommandError::InvalidArgument(format!("invalid nonce '{}': {}", input, e)))
}

pub fn address(account: &AccountService) -> Result<AddressOutput, CommandError> {
	Ok(AddressOutput {
		signer: account.get_address()?,
	})
}

pub fn sign_relay(
	account: &AccountService,
	nonce: U256,
	payload: &[u8],
) -> Result<SignatureOutput, CommandError> {
	let signature = account.sign_relay(nonce, payload)?;
	Ok(SignatureOutput {
		signer: account.get_address()?,
		nonce: Some(nonce.to_string()),
		digest: relay_digest(nonce, payload),
		signature,
	})
}

pub fn sign_message(
	account: &AccountService,
	payload: &[u8],
) -> Result<SignatureOutput, CommandError> {
	let signature = account.sign_message(payload)?;
	Ok(SignatureOutput {
		signer: account.get_address()?,
		nonce: None,
		digest: message_digest(payload),
		signature,
	})
}

pub fn recover_relay(
	nonce: U256,
	payload: &[u8],
	signature: &str,
) -> Result<RecoverOutput, CommandError> {
	let signature: RecoverableSignature = signature.parse()?;
	Ok(RecoverOutput {
		nonce: nonce.to_string(),
		digest: relay_digest(nonce, payload),
		signer: recover_relay_signer(nonce, payload, &signature)?,
	})
}

pub async fn classify(
	delivery: &DeliveryService,
	tx_hash: &str,
	budget: ExecutionBudget,
	wait: bool,
) -> Result<ClassifyOutput, CommandError> {
	let hash = TransactionHash(parse_hex(tx_hash)?);
	let outcome = if wait {
		delivery.wait_for_outcome(&hash, budget).await?
	} else {
		delivery.classify(&hash, budget).await?
	};

	Ok(ClassifyOutput {
		tx_hash: hash.to_string(),
		budget,
		outcome,
		retry_with_larger_budget: outcome.retry_with_larger_budget(),
	})
}
