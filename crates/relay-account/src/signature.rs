//! Signature normalization and signer recovery.

use crate::SigningError;
use alloy_primitives::keccak256;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use relay_types::{Address, RecoverableSignature, B256};

/// Validates raw primitive output and normalizes its recovery byte.
///
/// A raw recovery id in `{0, 1}` becomes `{27, 28}`; an already normalized
/// byte passes through. The input buffer is left untouched.
pub fn normalize_signature(raw: &[u8]) -> Result<RecoverableSignature, SigningError> {
	let wire: &[u8; RecoverableSignature::LENGTH] = raw
		.try_into()
		.map_err(|_| SigningError::InvalidSignatureLength(raw.len()))?;

	let v = match wire[64] {
		id @ (0 | 1) => id + RecoverableSignature::RECOVERY_OFFSET,
		v @ (27 | 28) => v,
		other => {
			return Err(SigningError::SigningFailed(format!(
				"unexpected recovery id {}",
				other
			)))
		},
	};

	let mut bytes = *wire;
	bytes[64] = v;
	RecoverableSignature::new(bytes).map_err(|e| SigningError::SigningFailed(e.to_string()))
}

/// Recovers the address that produced `signature` over `digest`.
pub fn recover_address(
	digest: &B256,
	signature: &RecoverableSignature,
) -> Result<Address, SigningError> {
	let sig = Signature::from_slice(&signature.as_bytes()[..64])
		.map_err(|e| SigningError::Recovery(e.to_string()))?;
	let recovery_id = RecoveryId::from_byte(signature.recovery_id()).ok_or_else(|| {
		SigningError::Recovery(format!("invalid recovery id {}", signature.recovery_id()))
	})?;

	let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
		.map_err(|e| SigningError::Recovery(e.to_string()))?;
	Ok(public_key_address(&key))
}

/// Ethereum address of a public key: low 20 bytes of Keccak-256 over the
/// uncompressed point without its `0x04` tag.
pub(crate) fn public_key_address(key: &VerifyingKey) -> Address {
	let point = key.to_encoded_point(false);
	let hash = keccak256(&point.as_bytes()[1..]);
	Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw_signature(v: u8) -> Vec<u8> {
		let mut raw = vec![0x11u8; 64];
		raw.push(v);
		raw
	}

	#[test]
	fn test_normalizes_raw_recovery_id() {
		assert_eq!(normalize_signature(&raw_signature(0)).unwrap().v(), 27);
		assert_eq!(normalize_signature(&raw_signature(1)).unwrap().v(), 28);
	}

	#[test]
	fn test_keeps_normalized_recovery_byte() {
		assert_eq!(normalize_signature(&raw_signature(27)).unwrap().v(), 27);
		assert_eq!(normalize_signature(&raw_signature(28)).unwrap().v(), 28);
	}

	#[test]
	fn test_does_not_mutate_input() {
		let raw = raw_signature(1);
		let signature = normalize_signature(&raw).unwrap();
		assert_eq!(raw[64], 1);
		assert_eq!(&signature.as_bytes()[..64], &raw[..64]);
	}

	#[test]
	fn test_rejects_unknown_recovery_byte() {
		assert!(matches!(
			normalize_signature(&raw_signature(2)),
			Err(SigningError::SigningFailed(_))
		));
	}

	#[test]
	fn test_rejects_wrong_length() {
		assert_eq!(
			normalize_signature(&[0u8; 64]),
			Err(SigningError::InvalidSignatureLength(64))
		);
		assert_eq!(
			normalize_signature(&[0u8; 66]),
			Err(SigningError::InvalidSignatureLength(66))
		);
		assert_eq!(
			normalize_signature(&[]),
			Err(SigningError::InvalidSignatureLength(0))
		);
	}

	#[test]
	fn test_recover_rejects_zero_signature() {
		let mut bytes = [0u8; 65];
		bytes[64] = 27;
		let signature = RecoverableSignature::new(bytes).unwrap();
		assert!(matches!(
			recover_address(&B256::repeat_byte(1), &signature),
			Err(SigningError::Recovery(_))
		));
	}
}
