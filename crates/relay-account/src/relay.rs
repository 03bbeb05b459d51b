//! Relay authorization signing.
//!
//! A relay authorization binds a payload to a nonce under the `"rlx:"` domain
//! tag and wraps the result in the signed-message convention, so the
//! receiving contract can recover the key holder with `ecrecover`:
//!
//! ```text
//! inner  = keccak256("rlx:" || uint256_be(nonce) || payload)
//! digest = keccak256("\x19Ethereum Signed Message:\n32" || inner)
//! ```

use crate::{normalize_signature, recover_address, AccountInterface, SigningError};
use relay_types::{relay_digest, Address, RecoverableSignature, U256};

/// Signs a relay authorization for `payload` at `nonce`.
pub fn sign_relay<A>(
	nonce: U256,
	payload: &[u8],
	key: &A,
) -> Result<RecoverableSignature, SigningError>
where
	A: AccountInterface + ?Sized,
{
	let digest = relay_digest(nonce, payload);
	let raw = key.sign_digest(&digest)?;
	let signature = normalize_signature(&raw)?;

	tracing::debug!(
		nonce = %nonce,
		payload_len = payload.len(),
		digest = %digest,
		"Signed relay authorization"
	);

	Ok(signature)
}

/// Recovers the key holder that authorized `payload` at `nonce`.
pub fn recover_relay_signer(
	nonce: U256,
	payload: &[u8],
	signature: &RecoverableSignature,
) -> Result<Address, SigningError> {
	recover_address(&relay_digest(nonce, payload), signature)
}
