//! Common types module for the relay signing and outcome tooling.
//!
//! This module defines the value types shared by the signing, delivery and
//! configuration crates, together with the digest helpers that every party to
//! a relay authorization has to agree on byte for byte.

/// Key and signature types for relay authorization.
pub mod account;
/// Execution receipt and outcome classification types.
pub mod delivery;
/// Digest construction and string formatting helpers.
pub mod utils;

pub use account::*;
pub use delivery::*;
pub use utils::{
	encode_nonce, eth_signed_message_hash, message_digest, relay_digest, relay_inner_hash,
	relay_message, with_0x_prefix, without_0x_prefix,
};

pub use alloy_primitives::{Address, B256, U256};
