//! Receipt delivery and outcome classification for submitted operations.
//!
//! This module fetches execution receipts for operations submitted by a relayer
//! and classifies them as success, revert, or budget exhaustion. Receipt
//! sources are pluggable: a JSON-RPC source backed by Alloy and an in-memory
//! source for tests and offline use.

use async_trait::async_trait;
use relay_types::{
	Classification, ExecutionBudget, ExecutionReceipt, ReceiptStatus, TransactionHash,
};
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
	pub mod memory;
}

pub mod classifier;

pub use classifier::classify;

/// Errors that can occur while fetching receipts.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The operation has no receipt yet (unknown or not yet mined).
	#[error("Receipt not found: {0}")]
	NotFound(String),
	/// No receipt appeared before the configured timeout.
	#[error("Timeout: {0}")]
	Timeout(String),
}

/// Trait defining the interface for receipt sources.
///
/// This trait must be implemented by any backend that can report the
/// execution result of a submitted operation.
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Retrieves the receipt for an operation if available.
	///
	/// Returns immediately; an operation without a receipt yields
	/// `DeliveryError::NotFound`.
	async fn get_receipt(&self, hash: &TransactionHash)
		-> Result<ExecutionReceipt, DeliveryError>;
}

/// Service that fetches receipts and classifies operation outcomes.
pub struct DeliveryService {
	/// The receipt source.
	provider: Box<dyn DeliveryInterface>,
	/// Delay between receipt polls while waiting.
	poll_interval: Duration,
	/// Maximum time to wait for a receipt.
	timeout: Duration,
}

impl DeliveryService {
	/// Creates a new DeliveryService over the given receipt source.
	pub fn new(
		provider: Box<dyn DeliveryInterface>,
		poll_interval: Duration,
		timeout: Duration,
	) -> Self {
		Self {
			provider,
			poll_interval,
			timeout,
		}
	}

	/// Fetches the current receipt for an operation.
	pub async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<ExecutionReceipt, DeliveryError> {
		self.provider.get_receipt(hash).await
	}

	/// Returns true if the operation executed successfully.
	pub async fn is_successful(&self, hash: &TransactionHash) -> Result<bool, DeliveryError> {
		let receipt = self.get_receipt(hash).await?;
		Ok(receipt.status == ReceiptStatus::Succeeded)
	}

	/// Returns true if the operation failed by exhausting its budget.
	pub async fn is_budget_exhausted(
		&self,
		hash: &TransactionHash,
		budget: ExecutionBudget,
	) -> Result<bool, DeliveryError> {
		Ok(self.classify(hash, budget).await? == Classification::BudgetExhausted)
	}

	/// Fetches the receipt and classifies it against `budget`.
	pub async fn classify(
		&self,
		hash: &TransactionHash,
		budget: ExecutionBudget,
	) -> Result<Classification, DeliveryError> {
		let receipt = self.get_receipt(hash).await?;
		let classification = classify(&receipt, budget);
		log_classification(hash, &receipt, budget, classification);
		Ok(classification)
	}

	/// Polls until the operation has a receipt, then classifies it.
	///
	/// Fails with `DeliveryError::Timeout` if no receipt shows up in time.
	/// Errors other than `NotFound` are returned immediately.
	pub async fn wait_for_outcome(
		&self,
		hash: &TransactionHash,
		budget: ExecutionBudget,
	) -> Result<Classification, DeliveryError> {
		let start_time = tokio::time::Instant::now();

		tracing::info!(
			tx_hash = %hash,
			timeout_ms = self.timeout.as_millis() as u64,
			"Waiting for receipt"
		);

		loop {
			match self.provider.get_receipt(hash).await {
				Ok(receipt) => {
					let classification = classify(&receipt, budget);
					log_classification(hash, &receipt, budget, classification);
					return Ok(classification);
				},
				Err(DeliveryError::NotFound(_)) => {
					if start_time.elapsed() >= self.timeout {
						return Err(DeliveryError::Timeout(format!(
							"no receipt for {} after {} ms",
							hash,
							self.timeout.as_millis()
						)));
					}
					tracing::debug!(tx_hash = %hash, "Receipt not available yet");
					tokio::time::sleep(self.poll_interval).await;
				},
				Err(e) => return Err(e),
			}
		}
	}
}

fn log_classification(
	hash: &TransactionHash,
	receipt: &ExecutionReceipt,
	budget: ExecutionBudget,
	classification: Classification,
) {
	match classification {
		Classification::BudgetExhausted => tracing::warn!(
			tx_hash = %hash,
			consumed = receipt.consumed,
			budget = budget.0,
			"Operation exhausted its budget"
		),
		_ => tracing::info!(
			tx_hash = %hash,
			consumed = receipt.consumed,
			budget = budget.0,
			outcome = %classification,
			"Classified operation"
		),
	}
}
