//! Caller-facing result shape.
//!
//! Serializes as `{"success": bool, "plan"|"analysis": string|null, "error": string|null}`.
//! The constructors only accept a `Result`, so exactly one of the payload and
//! the error is populated.

use serde::Serialize;

use crate::llm::{LlmError, LlmErrorKind};

use super::{BudgetReport, GeneratedPlan};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Plan(Option<String>),
    Analysis(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Payload,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<LlmErrorKind>,
}

impl Envelope {
    pub fn for_plan(result: &Result<GeneratedPlan, LlmError>) -> Self {
        match result {
            Ok(plan) => Self::success(Payload::Plan(Some(plan.plan.details.clone()))),
            Err(err) => Self::failure(Payload::Plan(None), err),
        }
    }

    pub fn for_analysis(result: &Result<BudgetReport, LlmError>) -> Self {
        match result {
            Ok(report) => Self::success(Payload::Analysis(Some(report.text.clone()))),
            Err(err) => Self::failure(Payload::Analysis(None), err),
        }
    }

    fn success(payload: Payload) -> Self {
        Self {
            success: true,
            payload,
            error: None,
            error_kind: None,
        }
    }

    fn failure(payload: Payload, err: &LlmError) -> Self {
        Self {
            success: false,
            payload,
            error: Some(err.message.clone()),
            error_kind: Some(err.kind),
        }
    }
}
