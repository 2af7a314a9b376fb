//! Plan persistence contract.
//!
//! The planner never touches storage directly; it goes through [`PlanStore`].
//! [`InMemoryPlanStore`] backs the CLI and tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::budget::ExpenseRecord;
use crate::travel::{NewPlan, TravelPlan};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("travel plan {0} not found")]
    PlanNotFound(Uuid),
    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Persist a generated plan for a user.
    async fn create_plan(&self, user_id: Uuid, plan: NewPlan) -> Result<TravelPlan, StoreError>;

    async fn get_plan(&self, plan_id: Uuid) -> Result<Option<TravelPlan>, StoreError>;

    /// Expenses recorded against a plan, in recording order.
    async fn list_expenses(&self, plan_id: Uuid) -> Result<Vec<ExpenseRecord>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryPlanStore {
    plans: RwLock<HashMap<Uuid, TravelPlan>>,
    expenses: RwLock<HashMap<Uuid, Vec<ExpenseRecord>>>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an expense against an existing plan.
    pub async fn add_expense(&self, plan_id: Uuid, expense: ExpenseRecord) -> Result<(), StoreError> {
        if !self.plans.read().await.contains_key(&plan_id) {
            return Err(StoreError::PlanNotFound(plan_id));
        }
        self.expenses
            .write()
            .await
            .entry(plan_id)
            .or_default()
            .push(expense);
        Ok(())
    }

    pub async fn plan_count(&self) -> usize {
        self.plans.read().await.len()
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn create_plan(&self, user_id: Uuid, plan: NewPlan) -> Result<TravelPlan, StoreError> {
        let stored = TravelPlan {
            id: Uuid::new_v4(),
            user_id,
            title: plan.title,
            destination: plan.destination,
            start_date: plan.start_date,
            end_date: plan.end_date,
            budget: plan.budget,
            preferences: plan.preferences,
            details: Some(plan.details),
            created_at: Utc::now(),
        };
        self.plans.write().await.insert(stored.id, stored.clone());
        tracing::debug!("Stored travel plan {} for user {}", stored.id, user_id);
        Ok(stored)
    }

    async fn get_plan(&self, plan_id: Uuid) -> Result<Option<TravelPlan>, StoreError> {
        Ok(self.plans.read().await.get(&plan_id).cloned())
    }

    async fn list_expenses(&self, plan_id: Uuid) -> Result<Vec<ExpenseRecord>, StoreError> {
        Ok(self
            .expenses
            .read()
            .await
            .get(&plan_id)
            .cloned()
            .unwrap_or_default())
    }
}
