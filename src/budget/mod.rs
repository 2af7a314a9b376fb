//! Budget module - expense aggregation and advisory rules.
//!
//! # Key Concepts
//! - Expense: a recorded spend against a travel plan
//! - Summary: totals, remaining budget and per-category sums, recomputed on
//!   every call from the supplied expenses
//! - Advisory: rule-based guidance derived from a summary
//! - Allocation: the fixed split used when proposing how to spend a budget

mod advisory;
mod allocation;
pub(crate) mod analysis;

pub use advisory::{advise, Advisory, DINING_LABELS, SHOPPING_LABELS};
pub use allocation::{BudgetAllocation, ALLOCATION_SHARES};
pub use analysis::{aggregate, BudgetContext, BudgetSummary, CategoryTotals, ExpenseRecord};
