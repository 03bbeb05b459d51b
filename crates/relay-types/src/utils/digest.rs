//! Relay authorization and message digests.
//!
//! These helpers provide:
//! - The fixed-width nonce encoding (uint256, big-endian, zero-padded)
//! - The relay framing `"rlx:" || nonce || payload` and its Keccak-256 hash
//! - The signed-message wrapping `"\x19Ethereum Signed Message:\n" || len || hash`

use alloy_primitives::{keccak256, B256, U256};

/// Domain tag prepended to every relay authorization.
pub const RELAY_PREFIX: &[u8] = b"rlx:";

/// Prefix of the standard signed-message convention.
pub const ETH_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Encodes a nonce as a 32-byte big-endian word.
///
/// Verifiers reconstruct exactly this encoding; a variable-width form would
/// still hash and sign fine but recover to the wrong address.
pub fn encode_nonce(nonce: U256) -> [u8; 32] {
	nonce.to_be_bytes::<32>()
}

/// Builds the framed relay message: `"rlx:" || encode_nonce(nonce) || payload`.
pub fn relay_message(nonce: U256, payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(RELAY_PREFIX.len() + 32 + payload.len());
	out.extend_from_slice(RELAY_PREFIX);
	out.extend_from_slice(&encode_nonce(nonce));
	out.extend_from_slice(payload);
	out
}

/// Keccak-256 of the framed relay message.
pub fn relay_inner_hash(nonce: U256, payload: &[u8]) -> B256 {
	keccak256(relay_message(nonce, payload))
}

/// Wraps a hash in the signed-message convention.
///
/// The length is written as ASCII decimal, which for a 32-byte hash is always `"32"`.
pub fn eth_signed_message(hash: &B256) -> Vec<u8> {
	let length = hash.len().to_string();
	let mut out = Vec::with_capacity(ETH_MESSAGE_PREFIX.len() + length.len() + hash.len());
	out.extend_from_slice(ETH_MESSAGE_PREFIX.as_bytes());
	out.extend_from_slice(length.as_bytes());
	out.extend_from_slice(hash.as_slice());
	out
}

/// Keccak-256 of [`eth_signed_message`].
pub fn eth_signed_message_hash(hash: &B256) -> B256 {
	keccak256(eth_signed_message(hash))
}

/// Final digest signed for a relay authorization.
pub fn relay_digest(nonce: U256, payload: &[u8]) -> B256 {
	eth_signed_message_hash(&relay_inner_hash(nonce, payload))
}

/// Digest signed for a plain message: Keccak-256 of the payload, unwrapped.
pub fn message_digest(payload: &[u8]) -> B256 {
	keccak256(payload)
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{b256, eip191_hash_message};

	#[test]
	fn test_encode_nonce_is_fixed_width() {
		assert_eq!(encode_nonce(U256::ZERO), [0u8; 32]);

		let encoded = encode_nonce(U256::from(0x0102u64));
		assert_eq!(&encoded[..30], &[0u8; 30]);
		assert_eq!(encoded[30], 0x01);
		assert_eq!(encoded[31], 0x02);

		assert_eq!(encode_nonce(U256::MAX), [0xffu8; 32]);
	}

	#[test]
	fn test_relay_message_layout() {
		let message = relay_message(U256::ZERO, &[]);
		assert_eq!(message.len(), 36);
		assert_eq!(&message[..4], b"rlx:");
		assert!(message[4..].iter().all(|&b| b == 0));

		let message = relay_message(U256::from(1u64), &[0xde, 0xad, 0xbe, 0xef]);
		assert_eq!(message.len(), 40);
		assert_eq!(message[35], 0x01);
		assert_eq!(&message[36..], &[0xde, 0xad, 0xbe, 0xef]);
	}

	#[test]
	fn test_zero_nonce_empty_payload_hashes() {
		assert_eq!(
			relay_inner_hash(U256::ZERO, &[]),
			b256!("0e5922bea01e2b67a7a9edbcb499b8da5c198b31eb0b7f3610038eaa2581695e")
		);
		assert_eq!(
			relay_digest(U256::ZERO, &[]),
			b256!("99bb0a73e8def9843c500e067f21563c2d92838513c43ef5cc9c34e02bd390e5")
		);
	}

	#[test]
	fn test_relay_inner_hash_with_payload() {
		assert_eq!(
			relay_inner_hash(U256::from(1u64), &[0xde, 0xad, 0xbe, 0xef]),
			b256!("8bd963fd2075094438439b257a92a828129173e26e9ca1e45ac656f7c95bc8cb")
		);
	}

	#[test]
	fn test_signed_message_wrapping() {
		let hash = B256::repeat_byte(0x42);
		let wrapped = eth_signed_message(&hash);
		assert_eq!(&wrapped[..26], b"\x19Ethereum Signed Message:\n");
		assert_eq!(&wrapped[26..28], b"32");
		assert_eq!(&wrapped[28..], hash.as_slice());

		// Same convention as the standard personal-sign hash.
		assert_eq!(eth_signed_message_hash(&hash), eip191_hash_message(hash));
	}

	#[test]
	fn test_message_digest_is_plain_keccak() {
		assert_eq!(
			message_digest(&[]),
			b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
		);
		assert_eq!(
			message_digest(b"hello"),
			b256!("1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8")
		);
	}

	#[test]
	fn test_digest_depends_on_nonce() {
		let payload = b"transfer";
		assert_ne!(
			relay_digest(U256::from(1u64), payload),
			relay_digest(U256::from(2u64), payload)
		);
		assert_eq!(
			relay_digest(U256::from(7u64), payload),
			relay_digest(U256::from(7u64), payload)
		);
	}
}
