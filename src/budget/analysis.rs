//! Expense aggregation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded expense. Read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Free-text label, e.g. "food" or "shopping".
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    /// Defaults to the time the record was submitted.
    #[serde(default = "Utc::now")]
    pub occurs_at: DateTime<Utc>,
}

impl ExpenseRecord {
    pub fn new(category: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amount,
            description: description.into(),
            occurs_at: Utc::now(),
        }
    }
}

/// A plan's budget together with the expenses recorded against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetContext {
    pub destination: String,
    pub budget: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

/// Summed amount per category label.
///
/// Labels are compared verbatim; "Food" and "food" are different categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<String, f64>);

impl CategoryTotals {
    pub fn get(&self, label: &str) -> f64 {
        self.0.get(label).copied().unwrap_or(0.0)
    }

    /// Sum over several labels that mean the same thing.
    pub fn sum_of(&self, labels: &[&str]) -> f64 {
        labels.iter().map(|label| self.get(label)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut totals = BTreeMap::new();
        for (label, amount) in iter {
            *totals.entry(label).or_insert(0.0) += amount;
        }
        CategoryTotals(totals)
    }
}

/// Aggregated view of a budget context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    /// `total_spent / budget`; `None` when the budget is zero.
    pub usage_ratio: Option<f64>,
    pub categories: CategoryTotals,
}

impl BudgetSummary {
    /// `amount` as a fraction of the budget, `None` when the budget is zero.
    pub fn share_of_budget(&self, amount: f64) -> Option<f64> {
        if self.budget == 0.0 {
            None
        } else {
            Some(amount / self.budget)
        }
    }
}

/// Aggregate expenses against the budget.
pub fn aggregate(context: &BudgetContext) -> BudgetSummary {
    let total_spent: f64 = context.expenses.iter().map(|e| e.amount).sum();
    let categories: CategoryTotals = context
        .expenses
        .iter()
        .map(|e| (e.category.clone(), e.amount))
        .collect();

    let usage_ratio = if context.budget == 0.0 {
        None
    } else {
        Some(total_spent / context.budget)
    };

    BudgetSummary {
        budget: context.budget,
        total_spent,
        remaining: context.budget - total_spent,
        usage_ratio,
        categories,
    }
}
