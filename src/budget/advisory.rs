//! Rule-based budget advisories.
//!
//! Exactly one balance advisory (overspent, low balance, on track) is always
//! produced. The category and headroom rules are evaluated independently and
//! appended after it.
//!
//! Category rules match labels by exact string equality against the fixed
//! reference labels below. There is no case folding, synonym handling or
//! translation, so an expense filed as "Dining" or "restaurants" is not
//! counted towards the dining rule.

use serde::Serialize;
use std::fmt;

use super::BudgetSummary;

/// Labels counted as dining spend.
pub const DINING_LABELS: &[&str] = &["food", "餐饮"];

/// Labels counted as shopping spend.
pub const SHOPPING_LABELS: &[&str] = &["shopping", "购物"];

const LOW_BALANCE_SHARE: f64 = 0.2;
const DINING_SHARE: f64 = 0.3;
const SHOPPING_SHARE: f64 = 0.2;
const HEADROOM_SHARE: f64 = 0.3;

/// A single piece of budget guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Spending exceeds the budget.
    Overspent { over_by: f64 },
    /// Less than 20% of the budget is left.
    LowBalance { remaining: f64 },
    /// At least 20% of the budget is left.
    OnTrack,
    /// Dining spend is above 30% of the budget.
    DiningHeavy { spent: f64 },
    /// Shopping spend is above 20% of the budget.
    ShoppingHeavy { spent: f64 },
    /// More than 30% of the budget is left.
    RoomForExperiences { remaining: f64 },
}

impl Advisory {
    /// Warnings render with a caution marker in reports.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Overspent { .. } | Self::LowBalance { .. })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overspent { over_by } => write!(
                f,
                "Warning: you are over budget by {:.2}. Please rein in spending.",
                over_by
            ),
            Self::LowBalance { remaining } => write!(
                f,
                "Caution: only {:.2} of your budget is left. Plan the remaining spending carefully.",
                remaining
            ),
            Self::OnTrack => write!(f, "Good: your budget usage is on track."),
            Self::DiningHeavy { spent } => write!(
                f,
                "Dining takes a large share of the budget ({:.2}). Try better-value restaurants or eat out less often.",
                spent
            ),
            Self::ShoppingHeavy { spent } => write!(
                f,
                "Shopping spend is high ({:.2}). Write a shopping list to avoid impulse purchases.",
                spent
            ),
            Self::RoomForExperiences { remaining } => write!(
                f,
                "You still have plenty of budget left ({:.2}). Consider adding a few more experiences.",
                remaining
            ),
        }
    }
}

/// Evaluate every advisory rule against a summary.
pub fn advise(summary: &BudgetSummary) -> Vec<Advisory> {
    let budget = summary.budget;
    let remaining = summary.remaining;
    let mut advisories = Vec::new();

    if remaining < 0.0 {
        advisories.push(Advisory::Overspent { over_by: -remaining });
    } else if remaining < budget * LOW_BALANCE_SHARE {
        advisories.push(Advisory::LowBalance { remaining });
    } else {
        advisories.push(Advisory::OnTrack);
    }

    let dining = summary.categories.sum_of(DINING_LABELS);
    if dining > budget * DINING_SHARE {
        advisories.push(Advisory::DiningHeavy { spent: dining });
    }

    let shopping = summary.categories.sum_of(SHOPPING_LABELS);
    if shopping > budget * SHOPPING_SHARE {
        advisories.push(Advisory::ShoppingHeavy { spent: shopping });
    }

    if remaining > budget * HEADROOM_SHARE {
        advisories.push(Advisory::RoomForExperiences { remaining });
    }

    advisories
}
