//! Key material and recoverable signature types.
//!
//! `PrivateKey` keeps raw secp256k1 scalar bytes in zeroizing storage and never
//! exposes them through `Debug`, `Display` or serialization. `RecoverableSignature`
//! is the 65-byte `r || s || v` wire form expected by verifiers, with `v` always
//! in the `{27, 28}` convention.

use crate::utils::{with_0x_prefix, without_0x_prefix};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors that can occur when parsing private key material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
	/// The key is not valid hexadecimal.
	#[error("Invalid key encoding: {0}")]
	InvalidEncoding(String),
	/// The key does not decode to exactly 32 bytes.
	#[error("Invalid key length: expected 32 bytes, got {0}")]
	InvalidLength(usize),
}

/// Errors that can occur when decoding a signature from its wire form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
	/// The signature is not exactly 65 bytes long.
	#[error("Invalid signature length: expected 65 bytes, got {0}")]
	InvalidLength(usize),
	/// The recovery byte is outside `{27, 28}`.
	#[error("Invalid recovery byte: {0}")]
	InvalidRecoveryId(u8),
	/// The signature is not valid hexadecimal.
	#[error("Invalid signature encoding: {0}")]
	InvalidEncoding(String),
}

/// A secp256k1 private key.
///
/// The bytes are zeroed when the value is dropped. Whether the bytes form a
/// valid scalar is only checked when the key is used for signing.
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<[u8; 32]>);

impl PrivateKey {
	/// Wraps raw scalar bytes.
	pub fn from_bytes(bytes: [u8; 32]) -> Self {
		Self(Zeroizing::new(bytes))
	}

	/// Copies a 32-byte slice into a new key.
	pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
		if bytes.len() != 32 {
			return Err(KeyError::InvalidLength(bytes.len()));
		}
		let mut key = Zeroizing::new([0u8; 32]);
		key.copy_from_slice(bytes);
		Ok(Self(key))
	}

	/// Exposes the raw key bytes to a closure.
	///
	/// # Security Warning
	/// Do not copy the bytes out of the closure into long-lived storage.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&[u8; 32]) -> R,
	{
		f(&self.0)
	}
}

impl FromStr for PrivateKey {
	type Err = KeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let decoded = Zeroizing::new(
			hex::decode(without_0x_prefix(s.trim()))
				.map_err(|e| KeyError::InvalidEncoding(e.to_string()))?,
		);
		Self::from_slice(&decoded)
	}
}

impl fmt::Debug for PrivateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "PrivateKey(***REDACTED***)")
	}
}

impl fmt::Display for PrivateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl PartialEq for PrivateKey {
	fn eq(&self, other: &Self) -> bool {
		*self.0 == *other.0
	}
}

impl Eq for PrivateKey {}

// Serializing never writes the key material.
impl Serialize for PrivateKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for PrivateKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = Zeroizing::new(String::deserialize(deserializer)?);
		s.parse().map_err(serde::de::Error::custom)
	}
}

/// A 65-byte recoverable ECDSA signature: `r (32) || s (32) || v (1)`.
///
/// `v` is always 27 or 28.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoverableSignature([u8; 65]);

impl RecoverableSignature {
	/// Length of the wire form in bytes.
	pub const LENGTH: usize = 65;

	/// Offset added to the raw recovery id to obtain `v`.
	pub const RECOVERY_OFFSET: u8 = 27;

	/// Creates a signature from its wire bytes, checking the recovery byte.
	pub fn new(bytes: [u8; Self::LENGTH]) -> Result<Self, SignatureError> {
		match bytes[64] {
			27 | 28 => Ok(Self(bytes)),
			v => Err(SignatureError::InvalidRecoveryId(v)),
		}
	}

	/// The `r` component.
	pub fn r(&self) -> &[u8] {
		&self.0[..32]
	}

	/// The `s` component.
	pub fn s(&self) -> &[u8] {
		&self.0[32..64]
	}

	/// The recovery byte in the `{27, 28}` convention.
	pub fn v(&self) -> u8 {
		self.0[64]
	}

	/// The raw recovery id in `{0, 1}`.
	pub fn recovery_id(&self) -> u8 {
		self.v() - Self::RECOVERY_OFFSET
	}

	pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
		&self.0
	}

	pub fn to_vec(&self) -> Vec<u8> {
		self.0.to_vec()
	}
}

impl TryFrom<&[u8]> for RecoverableSignature {
	type Error = SignatureError;

	fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
		let array: [u8; Self::LENGTH] = bytes
			.try_into()
			.map_err(|_| SignatureError::InvalidLength(bytes.len()))?;
		Self::new(array)
	}
}

impl FromStr for RecoverableSignature {
	type Err = SignatureError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let bytes = hex::decode(without_0x_prefix(s.trim()))
			.map_err(|e| SignatureError::InvalidEncoding(e.to_string()))?;
		Self::try_from(bytes.as_slice())
	}
}

impl fmt::Display for RecoverableSignature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", with_0x_prefix(&hex::encode(self.0)))
	}
}

impl fmt::Debug for RecoverableSignature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RecoverableSignature({})", self)
	}
}

impl Serialize for RecoverableSignature {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for RecoverableSignature {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}
