//! JSON-RPC receipt source using the Alloy library.
//!
//! Reads `eth_getTransactionReceipt` from an EVM node and maps the receipt's
//! status and `gasUsed` into an `ExecutionReceipt`.

use crate::{DeliveryError, DeliveryInterface};
use alloy_primitives::B256;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_transport_http::Http;
use async_trait::async_trait;
use relay_types::{ExecutionReceipt, ReceiptStatus, TransactionHash};
use std::sync::Arc;

/// Alloy-based EVM receipt source.
pub struct AlloyDelivery {
	/// HTTP provider for the configured node.
	provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
}

impl AlloyDelivery {
	/// Creates a read-only provider for the node at `rpc_url`.
	pub fn new(rpc_url: &str) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

		let provider = ProviderBuilder::new().on_http(url);

		Ok(Self {
			provider: Arc::new(provider)
				as Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
		})
	}
}

/// Converts a raw operation hash into a 32-byte EVM transaction hash.
fn to_tx_hash(hash: &TransactionHash) -> Result<B256, DeliveryError> {
	B256::try_from(hash.0.as_slice()).map_err(|_| {
		DeliveryError::Network(format!(
			"Invalid transaction hash length: expected 32 bytes, got {}",
			hash.0.len()
		))
	})
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<ExecutionReceipt, DeliveryError> {
		let tx_hash = to_tx_hash(hash)?;

		match self.provider.get_transaction_receipt(tx_hash).await {
			Ok(Some(receipt)) => {
				let status = if receipt.status() {
					ReceiptStatus::Succeeded
				} else {
					ReceiptStatus::Failed
				};
				let consumed: u64 = receipt.gas_used.try_into().map_err(|_| {
					DeliveryError::Network(format!("gasUsed out of range for {}", hash))
				})?;

				tracing::debug!(tx_hash = %hash, ?status, consumed, "Fetched receipt");
				Ok(ExecutionReceipt { status, consumed })
			},
			Ok(None) => Err(DeliveryError::NotFound(hash.to_string())),
			Err(e) => Err(DeliveryError::Network(format!(
				"Failed to get receipt: {}",
				e
			))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rejects_invalid_url() {
		assert!(matches!(
			AlloyDelivery::new("not a url"),
			Err(DeliveryError::Network(_))
		));
	}

	#[test]
	fn test_hash_length_is_checked() {
		assert!(to_tx_hash(&TransactionHash(vec![1u8; 32])).is_ok());
		assert!(matches!(
			to_tx_hash(&TransactionHash(vec![1u8; 20])),
			Err(DeliveryError::Network(_))
		));
	}

	#[tokio::test]
	async fn test_accepts_http_url() {
		assert!(AlloyDelivery::new("http://localhost:8545").is_ok());
	}
}
