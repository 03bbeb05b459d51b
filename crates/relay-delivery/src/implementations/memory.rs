//! In-memory receipt source.
//!
//! Receipts are recorded by hand, which makes this source useful for tests and
//! for classifying receipts obtained out of band. Clones share the same store.

use crate::{DeliveryError, DeliveryInterface};
use async_trait::async_trait;
use relay_types::{ExecutionReceipt, TransactionHash};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory receipt store keyed by operation hash.
#[derive(Clone, Default)]
pub struct MemoryDelivery {
	receipts: Arc<RwLock<HashMap<TransactionHash, ExecutionReceipt>>>,
}

impl MemoryDelivery {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records (or replaces) the receipt for `hash`.
	pub async fn insert(&self, hash: TransactionHash, receipt: ExecutionReceipt) {
		let mut receipts = self.receipts.write().await;
		receipts.insert(hash, receipt);
	}
}

#[async_trait]
impl DeliveryInterface for MemoryDelivery {
	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<ExecutionReceipt, DeliveryError> {
		let receipts = self.receipts.read().await;
		receipts
			.get(hash)
			.copied()
			.ok_or_else(|| DeliveryError::NotFound(hash.to_string()))
	}
}
