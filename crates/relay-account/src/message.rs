//! Plain message signing: `sign(keccak256(payload))` without relay framing
//! or signed-message wrapping.

use crate::{normalize_signature, recover_address, AccountInterface, SigningError};
use relay_types::{message_digest, Address, RecoverableSignature};

/// Signs the Keccak-256 hash of `payload`.
pub fn sign_message<A>(payload: &[u8], key: &A) -> Result<RecoverableSignature, SigningError>
where
	A: AccountInterface + ?Sized,
{
	let digest = message_digest(payload);
	let raw = key.sign_digest(&digest)?;
	let signature = normalize_signature(&raw)?;

	tracing::debug!(payload_len = payload.len(), digest = %digest, "Signed message");

	Ok(signature)
}

/// Recovers the address that signed `payload` with [`sign_message`].
pub fn recover_message_signer(
	payload: &[u8],
	signature: &RecoverableSignature,
) -> Result<Address, SigningError> {
	recover_address(&message_digest(payload), signature)
}
