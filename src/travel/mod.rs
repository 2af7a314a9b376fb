//! Travel planning module - itinerary generation and budget reports.
//!
//! This module is designed around request-scoped values:
//! - Inputs are immutable and built once per call
//! - Prompt building and mock synthesis are pure functions
//! - Network I/O is confined to [`TravelPlanner`]

mod envelope;
mod mock;
mod planner;
pub mod prompt;

pub use envelope::{Envelope, Payload};
pub use mock::{mock_analysis, mock_plan};
pub use planner::{BudgetReport, GeneratedPlan, PlanningError, TravelPlanner};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::budget::{BudgetContext, ExpenseRecord};

/// A traveler's request for an itinerary.
///
/// Date ordering is the caller's responsibility and is not checked here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    /// Free text, may be empty.
    #[serde(default)]
    pub preferences: String,
    #[serde(default = "default_travelers")]
    pub traveler_count: u32,
}

fn default_travelers() -> u32 {
    1
}

impl GenerationRequest {
    /// Title used for the persisted plan.
    pub fn plan_title(&self) -> String {
        format!(
            "{} travel plan ({} - {})",
            self.destination, self.start_date, self.end_date
        )
    }
}

/// Plan-creation payload handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlan {
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub preferences: String,
    /// The generated itinerary narrative.
    pub details: String,
}

impl NewPlan {
    pub fn from_request(request: &GenerationRequest, details: String) -> Self {
        Self {
            title: request.plan_title(),
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            budget: request.budget,
            preferences: request.preferences.clone(),
            details,
        }
    }
}

/// A plan as stored by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub preferences: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TravelPlan {
    /// Budget context for analysing this plan's expenses.
    pub fn budget_context(&self, expenses: Vec<ExpenseRecord>) -> BudgetContext {
        BudgetContext {
            destination: self.destination.clone(),
            budget: self.budget,
            start_date: self.start_date,
            end_date: self.end_date,
            expenses,
        }
    }
}
