//! Execution receipt types for submitted operations.
//!
//! This module defines the receipt shape consumed by outcome classification,
//! the computation budget an operation was allotted, and the resulting
//! three-way classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Submitted operation hash representation.
///
/// Stores hashes as raw bytes so receipt sources are free to use their own format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Final execution status reported by a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
	Succeeded,
	Failed,
}

/// Maximum computation units (gas) allotted to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionBudget(pub u64);

impl From<u64> for ExecutionBudget {
	fn from(units: u64) -> Self {
		Self(units)
	}
}

/// Result of a previously submitted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
	/// Whether the operation executed successfully.
	pub status: ReceiptStatus,
	/// Computation units actually consumed.
	pub consumed: u64,
}

impl ExecutionReceipt {
	pub fn succeeded(consumed: u64) -> Self {
		Self {
			status: ReceiptStatus::Succeeded,
			consumed,
		}
	}

	pub fn failed(consumed: u64) -> Self {
		Self {
			status: ReceiptStatus::Failed,
			consumed,
		}
	}
}

/// Outcome of an operation, derived from its receipt and budget.
///
/// Never stored; recompute it from the receipt whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
	/// The operation succeeded.
	Success,
	/// The operation's own logic aborted it before the budget ran out.
	Reverted,
	/// The operation failed after consuming its whole budget.
	BudgetExhausted,
}

impl Classification {
	pub fn is_success(&self) -> bool {
		matches!(self, Classification::Success)
	}

	/// Whether retrying with a larger budget could change the outcome.
	pub fn retry_with_larger_budget(&self) -> bool {
		matches!(self, Classification::BudgetExhausted)
	}
}

impl fmt::Display for Classification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Classification::Success => "success",
			Classification::Reverted => "reverted",
			Classification::BudgetExhausted => "budget_exhausted",
		};
		f.write_str(label)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classification_labels_match_serde() {
		for classification in [
			Classification::Success,
			Classification::Reverted,
			Classification::BudgetExhausted,
		] {
			let json = serde_json::to_string(&classification).unwrap();
			assert_eq!(json, format!("\"{}\"", classification));
		}
	}

	#[test]
	fn test_only_exhaustion_suggests_larger_budget() {
		assert!(Classification::BudgetExhausted.retry_with_larger_budget());
		assert!(!Classification::Reverted.retry_with_larger_budget());
		assert!(!Classification::Success.retry_with_larger_budget());
		assert!(Classification::Success.is_success());
	}

	#[test]
	fn test_transaction_hash_display() {
		let hash = TransactionHash(vec![0xde, 0xad, 0xbe, 0xef]);
		assert_eq!(hash.to_string(), "0xdeadbeef");
	}
}
