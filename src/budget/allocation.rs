//! Fixed budget split proposed by the itinerary template.

use serde::Serialize;

/// Lodging, food, tickets and transport, shopping and other.
pub const ALLOCATION_SHARES: [f64; 4] = [0.4, 0.25, 0.25, 0.1];

/// A budget divided across the standard spending buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetAllocation {
    pub lodging: f64,
    pub food: f64,
    pub tickets_and_transport: f64,
    pub shopping_and_other: f64,
}

impl BudgetAllocation {
    pub fn split(budget: f64) -> Self {
        let [lodging, food, tickets, other] = ALLOCATION_SHARES;
        Self {
            lodging: budget * lodging,
            food: budget * food,
            tickets_and_transport: budget * tickets,
            shopping_and_other: budget * other,
        }
    }

    /// `(label, amount)` pairs in display order.
    pub fn lines(&self) -> [(&'static str, f64); 4] {
        [
            ("Lodging", self.lodging),
            ("Food", self.food),
            ("Tickets & transport", self.tickets_and_transport),
            ("Shopping & other", self.shopping_and_other),
        ]
    }
}
