//! Local private key account implementation.
//!
//! Signs with an in-process secp256k1 key. The `k256` signing key is rebuilt
//! from the zeroizing key bytes for every call and dropped before returning,
//! so no expanded key material outlives the call.

use crate::{AccountInterface, SigningError};
use alloy_signer_local::PrivateKeySigner;
use k256::ecdsa::SigningKey;
use relay_types::{Address, PrivateKey, B256};

impl AccountInterface for PrivateKey {
	fn address(&self) -> Result<Address, SigningError> {
		self.with_exposed(|bytes| {
			PrivateKeySigner::from_slice(bytes)
				.map(|signer| signer.address())
				.map_err(|e| SigningError::SigningFailed(format!("Invalid private key: {}", e)))
		})
	}

	fn sign_digest(&self, digest: &B256) -> Result<Vec<u8>, SigningError> {
		self.with_exposed(|bytes| {
			let signing_key = SigningKey::from_slice(bytes)
				.map_err(|e| SigningError::SigningFailed(format!("Invalid private key: {}", e)))?;
			let (signature, recovery_id) = signing_key
				.sign_prehash_recoverable(digest.as_slice())
				.map_err(|e| SigningError::SigningFailed(e.to_string()))?;

			let mut raw = Vec::with_capacity(65);
			raw.extend_from_slice(&signature.to_bytes());
			raw.push(recovery_id.to_byte());
			Ok(raw)
		})
	}
}
