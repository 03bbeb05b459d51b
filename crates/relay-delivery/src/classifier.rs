//! Three-way outcome classification of execution receipts.
//!
//! A failed operation that consumed its entire budget ran out of gas rather
//! than hitting an explicit revert; on the receipt alone the two look the same,
//! so the allotted budget is needed to tell them apart.

use relay_types::{Classification, ExecutionBudget, ExecutionReceipt, ReceiptStatus};

/// Classifies a receipt against the budget the operation was given.
///
/// A successful status always wins. A failure that consumed the whole budget
/// (or more, should an execution model ever report that) is budget
/// exhaustion; any other failure is a revert.
pub fn classify(receipt: &ExecutionReceipt, budget: ExecutionBudget) -> Classification {
	match receipt.status {
		ReceiptStatus::Succeeded => Classification::Success,
		ReceiptStatus::Failed if receipt.consumed >= budget.0 => Classification::BudgetExhausted,
		ReceiptStatus::Failed => Classification::Reverted,
	}
}
