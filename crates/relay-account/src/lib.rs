//! Account and signing module for relay authorizations.
//!
//! This module provides the signing side of the relay scheme: a key holder
//! pre-authorizes a relayer to submit a specific payload at a specific nonce
//! (`sign_relay`), or attests to an exact byte sequence (`sign_message`).
//! Both produce 65-byte recoverable signatures with `v` in `{27, 28}`.

use relay_types::{Address, RecoverableSignature, B256, U256};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

pub mod message;
pub mod relay;
pub mod signature;

pub use message::{recover_message_signer, sign_message};
pub use relay::{recover_relay_signer, sign_relay};
pub use signature::{normalize_signature, recover_address};

/// Errors that can occur during signing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningError {
	/// The underlying signing primitive rejected the request.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// The signing primitive produced a signature that is not 65 bytes long.
	#[error("Invalid signature length: expected 65 bytes, got {0}")]
	InvalidSignatureLength(usize),
	/// The signer could not be recovered from a signature.
	#[error("Recovery failed: {0}")]
	Recovery(String),
}

/// Trait defining the interface for signing accounts.
///
/// Implementations wrap a recoverable secp256k1 signing primitive. They sign
/// prepared digests only; framing and hashing are done by [`sign_relay`] and
/// [`sign_message`].
pub trait AccountInterface: Send + Sync {
	/// Retrieves the address associated with this account.
	fn address(&self) -> Result<Address, SigningError>;

	/// Signs a 32-byte digest.
	///
	/// Returns the primitive's raw output, expected to be `r || s || v` with a
	/// raw recovery id. Callers validate and normalize it.
	fn sign_digest(&self, digest: &B256) -> Result<Vec<u8>, SigningError>;
}

/// Service that manages signing for a single account.
pub struct AccountService {
	/// The underlying account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the address associated with the managed account.
	pub fn get_address(&self) -> Result<Address, SigningError> {
		self.implementation.address()
	}

	/// Authorizes a relayer to submit `payload` at `nonce`.
	pub fn sign_relay(
		&self,
		nonce: U256,
		payload: &[u8],
	) -> Result<RecoverableSignature, SigningError> {
		relay::sign_relay(nonce, payload, self.implementation.as_ref())
	}

	/// Signs the Keccak-256 hash of `payload` directly.
	pub fn sign_message(&self, payload: &[u8]) -> Result<RecoverableSignature, SigningError> {
		message::sign_message(payload, self.implementation.as_ref())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use relay_types::PrivateKey;

	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn test_service() -> AccountService {
		let key: PrivateKey = TEST_KEY.parse().unwrap();
		AccountService::new(Box::new(key))
	}

	#[test]
	fn test_service_round_trip() {
		let service = test_service();
		let address = service.get_address().unwrap();

		let relay_sig = service.sign_relay(U256::from(3u64), b"payload").unwrap();
		assert_eq!(
			recover_relay_signer(U256::from(3u64), b"payload", &relay_sig).unwrap(),
			address
		);

		let message_sig = service.sign_message(b"payload").unwrap();
		assert_eq!(
			recover_message_signer(b"payload", &message_sig).unwrap(),
			address
		);
	}

	#[test]
	fn test_relay_and_message_signatures_differ() {
		let service = test_service();
		let relay_sig = service.sign_relay(U256::ZERO, b"payload").unwrap();
		let message_sig = service.sign_message(b"payload").unwrap();
		assert_ne!(relay_sig, message_sig);
	}
}
