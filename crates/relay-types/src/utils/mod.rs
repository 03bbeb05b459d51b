//! Utility functions for digest construction and hex formatting.
//!
//! The digest helpers define the exact bytes that a relay authorization or a
//! plain message signature commits to. Verifiers rebuild the same bytes, so
//! any change here breaks signature recovery on the other side.

pub mod digest;
pub mod formatting;

pub use digest::{
	encode_nonce, eth_signed_message, eth_signed_message_hash, message_digest, relay_digest,
	relay_inner_hash, relay_message, ETH_MESSAGE_PREFIX, RELAY_PREFIX,
};
pub use formatting::{with_0x_prefix, without_0x_prefix};
