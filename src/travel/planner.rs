//! Generation and analysis orchestration.
//!
//! ```text
//!   request ──► settings snapshot ──► select_provider
//!                                        │
//!                     ┌──────────────────┼───────────────────┐
//!                     ▼                  ▼                   ▼
//!                   Mock           OpenAI-style        Dashscope-style
//!              (mock_plan /      (prompt + POST)      (prompt + POST)
//!               mock_analysis)
//!                     └──────────────────┼───────────────────┘
//!                                        ▼
//!                          GeneratedPlan / BudgetReport
//! ```
//!
//! Each call is attempted once. A failure is returned unchanged and nothing
//! is persisted.

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::budget::{advise, aggregate, Advisory, BudgetContext, BudgetSummary};
use crate::config::ProviderConfig;
use crate::llm::{
    build_adapter, select_provider, LlmError, ProviderAdapter, ProviderKind, Purpose,
    REQUEST_TIMEOUT,
};
use crate::settings::SharedSettingsStore;
use crate::store::{PlanStore, StoreError};

use super::mock::{mock_analysis, mock_plan};
use super::prompt::{analysis_prompts, generation_prompts};
use super::{GenerationRequest, NewPlan, TravelPlan};

/// A generated itinerary packaged for persistence.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub plan: NewPlan,
    pub provider: ProviderKind,
    /// Raw provider response, `{"mock": true}` on the mock path.
    pub raw: Value,
}

/// A rendered budget report and the aggregation behind it.
#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub text: String,
    pub summary: BudgetSummary,
    pub advisories: Vec<Advisory>,
    pub provider: ProviderKind,
    pub raw: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error(transparent)]
    Provider(#[from] LlmError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates prompt building, provider selection and dispatch.
///
/// Holds one HTTP client for connection reuse. The client carries no
/// per-request state, so a planner can serve concurrent calls.
pub struct TravelPlanner {
    client: Client,
    settings: SharedSettingsStore,
    timeout: Duration,
    adapter_override: Option<Arc<dyn ProviderAdapter>>,
}

impl TravelPlanner {
    pub fn new(settings: SharedSettingsStore) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: SharedSettingsStore) -> Self {
        Self {
            client,
            settings,
            timeout: REQUEST_TIMEOUT,
            adapter_override: None,
        }
    }

    /// Shorten the provider timeout. Used by tests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route provider calls to `adapter` instead of the configured provider.
    ///
    /// Selection still runs first: an unconfigured or placeholder provider
    /// takes the mock path and never reaches `adapter`.
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.adapter_override = Some(adapter);
        self
    }

    fn resolve_adapter(&self, provider: &ProviderConfig) -> Option<Arc<dyn ProviderAdapter>> {
        if select_provider(provider) == ProviderKind::Mock {
            return None;
        }
        if let Some(adapter) = &self.adapter_override {
            return Some(adapter.clone());
        }
        build_adapter(provider, &self.client, self.timeout).map(Arc::from)
    }

    /// Generate an itinerary for a request.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedPlan, LlmError> {
        let settings = self.settings.get().await;

        let Some(adapter) = self.resolve_adapter(&settings.provider) else {
            tracing::info!(
                "No AI provider configured, generating mock plan for {}",
                request.destination
            );
            let completion = mock_plan(request);
            return Ok(GeneratedPlan {
                plan: NewPlan::from_request(request, completion.text),
                provider: ProviderKind::Mock,
                raw: completion.raw,
            });
        };

        let prompts = generation_prompts(request, settings.language);
        tracing::info!(
            "Generating plan for {} via {} provider",
            request.destination,
            adapter.kind()
        );

        let completion = adapter
            .complete(&prompts, Purpose::Itinerary.params())
            .await
            .map_err(|e| {
                tracing::warn!("Plan generation failed ({}): {}", e.kind, e.message);
                e
            })?;

        if completion.text.trim().is_empty() {
            tracing::warn!("Provider returned an empty plan for {}", request.destination);
            return Err(LlmError::format("AI service returned no usable plan content"));
        }

        Ok(GeneratedPlan {
            plan: NewPlan::from_request(request, completion.text),
            provider: adapter.kind(),
            raw: completion.raw,
        })
    }

    /// Generate an itinerary and persist it only if generation succeeded.
    pub async fn generate_and_save(
        &self,
        store: &dyn PlanStore,
        user_id: Uuid,
        request: &GenerationRequest,
    ) -> Result<TravelPlan, PlanningError> {
        let generated = self.generate(request).await?;
        let stored = store.create_plan(user_id, generated.plan).await?;
        tracing::info!("Saved travel plan {} ({})", stored.id, stored.title);
        Ok(stored)
    }

    /// Produce a budget report for a plan's expenses.
    pub async fn analyze(&self, context: &BudgetContext) -> Result<BudgetReport, LlmError> {
        let settings = self.settings.get().await;
        let summary = aggregate(context);
        let advisories = advise(&summary);

        let Some(adapter) = self.resolve_adapter(&settings.provider) else {
            tracing::info!(
                "No AI provider configured, generating mock budget analysis for {}",
                context.destination
            );
            let completion = mock_analysis(context);
            return Ok(BudgetReport {
                text: completion.text,
                summary,
                advisories,
                provider: ProviderKind::Mock,
                raw: completion.raw,
            });
        };

        let prompts = analysis_prompts(context, settings.language);
        tracing::info!(
            "Analyzing {} expenses for {} via {} provider",
            context.expenses.len(),
            context.destination,
            adapter.kind()
        );

        let completion = adapter
            .complete(&prompts, Purpose::BudgetAnalysis.params())
            .await
            .map_err(|e| {
                tracing::warn!("Budget analysis failed ({}): {}", e.kind, e.message);
                e
            })?;

        Ok(BudgetReport {
            text: completion.text,
            summary,
            advisories,
            provider: adapter.kind(),
            raw: completion.raw,
        })
    }

    /// Load a stored plan with its expenses and analyze it.
    pub async fn analyze_plan(
        &self,
        store: &dyn PlanStore,
        plan_id: Uuid,
    ) -> Result<BudgetReport, PlanningError> {
        let plan = store
            .get_plan(plan_id)
            .await?
            .ok_or(StoreError::PlanNotFound(plan_id))?;
        let expenses = store.list_expenses(plan_id).await?;
        Ok(self.analyze(&plan.budget_context(expenses)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::analysis::tests::context;
    use crate::budget::ExpenseRecord;
    use crate::llm::stub::{self, StubResponse};
    use crate::llm::{Completion, CompletionParams, GenerationResult, LlmErrorKind, PromptPair};
    use crate::settings::{Settings, SettingsStore};
    use crate::store::InMemoryPlanStore;
    use crate::travel::tests::lisbon_request;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn openai() -> ProviderConfig {
        ProviderConfig::new("sk-1", "https://api.openai.com/v1/chat/completions")
    }

    fn planner_with(provider: ProviderConfig) -> TravelPlanner {
        TravelPlanner::new(Arc::new(SettingsStore::in_memory(Settings {
            provider,
            ..Settings::default()
        })))
    }

    /// Adapter that fails every call and counts attempts.
    struct FailingAdapter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProviderAdapter for FailingAdapter {
        fn kind(&self) -> ProviderKind {
            ProviderKind::OpenAiStyle
        }

        async fn complete(&self, _: &PromptPair, _: CompletionParams) -> GenerationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::transport("connection reset"))
        }
    }

    /// Adapter that answers with fixed text.
    struct CannedAdapter(&'static str);

    #[async_trait]
    impl ProviderAdapter for CannedAdapter {
        fn kind(&self) -> ProviderKind {
            ProviderKind::DashscopeStyle
        }

        async fn complete(&self, _: &PromptPair, _: CompletionParams) -> GenerationResult {
            Ok(Completion {
                text: self.0.to_string(),
                raw: json!({"output": {"text": self.0}}),
            })
        }
    }

    #[tokio::test]
    async fn test_unconfigured_planner_uses_mock() {
        let planner = planner_with(ProviderConfig::default());
        let generated = planner.generate(&lisbon_request()).await.unwrap();

        assert_eq!(generated.provider, ProviderKind::Mock);
        assert!(generated.plan.details.contains("Lisbon"));
        assert_eq!(generated.plan.title, "Lisbon travel plan (2025-06-01 - 2025-06-05)");
        assert_eq!(generated.raw, json!({"mock": true}));
    }

    #[tokio::test]
    async fn test_placeholder_endpoint_uses_mock() {
        let planner = planner_with(ProviderConfig::new("sk-1", "https://api.example.com/v1"));
        let generated = planner.generate(&lisbon_request()).await.unwrap();
        assert_eq!(generated.provider, ProviderKind::Mock);
    }

    #[tokio::test]
    async fn test_generates_through_openai_style_provider() {
        let server = stub::spawn(StubResponse::json(json!({
            "choices": [{"message": {"content": "Day 1: Belém"}}]
        })))
        .await;
        let planner = planner_with(ProviderConfig::new("sk-1", server.url()));

        let generated = planner.generate(&lisbon_request()).await.unwrap();

        assert_eq!(generated.provider, ProviderKind::OpenAiStyle);
        assert_eq!(generated.plan.details, "Day 1: Belém");
        let seen = server.last_request().unwrap();
        assert!(seen.body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("Destination: Lisbon"));
    }

    #[tokio::test]
    async fn test_timeout_is_reported_once_and_not_persisted() {
        let server = stub::spawn(StubResponse::delayed(
            Duration::from_secs(5),
            json!({"choices": [{"message": {"content": "late"}}]}),
        ))
        .await;
        let planner = planner_with(ProviderConfig::new("sk-1", server.url()))
            .with_request_timeout(Duration::from_millis(200));
        let store = InMemoryPlanStore::new();

        let err = planner
            .generate_and_save(&store, Uuid::new_v4(), &lisbon_request())
            .await
            .unwrap_err();

        match err {
            PlanningError::Provider(e) => assert_eq!(e.kind, LlmErrorKind::Timeout),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(server.hits(), 1);
        assert_eq!(store.plan_count().await, 0);
    }

    #[tokio::test]
    async fn test_failures_are_not_retried() {
        let adapter = Arc::new(FailingAdapter {
            calls: AtomicUsize::new(0),
        });
        let planner = planner_with(openai()).with_adapter(adapter.clone());

        let err = planner.generate(&lisbon_request()).await.unwrap_err();

        assert_eq!(err.kind, LlmErrorKind::Transport);
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_injected_adapter_unused_without_provider() {
        for provider in [
            ProviderConfig::default(),
            ProviderConfig::new("sk-1", "https://api.example.com/v1"),
        ] {
            let adapter = Arc::new(FailingAdapter {
                calls: AtomicUsize::new(0),
            });
            let planner = planner_with(provider).with_adapter(adapter.clone());

            let generated = planner.generate(&lisbon_request()).await.unwrap();
            let report = planner
                .analyze(&context(1000.0, &[("food", 100.0)]))
                .await
                .unwrap();

            assert_eq!(generated.provider, ProviderKind::Mock);
            assert_eq!(report.provider, ProviderKind::Mock);
            assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_empty_plan_is_a_failure() {
        let planner =
            planner_with(openai()).with_adapter(Arc::new(CannedAdapter("  \n")));
        let store = InMemoryPlanStore::new();

        let result = planner
            .generate_and_save(&store, Uuid::new_v4(), &lisbon_request())
            .await;

        assert!(matches!(result, Err(PlanningError::Provider(ref e)) if e.kind == LlmErrorKind::Format));
        assert_eq!(store.plan_count().await, 0);
    }

    #[tokio::test]
    async fn test_generate_and_save_persists_on_success() {
        let planner = planner_with(ProviderConfig::default());
        let store = InMemoryPlanStore::new();
        let user = Uuid::new_v4();

        let stored = planner
            .generate_and_save(&store, user, &lisbon_request())
            .await
            .unwrap();

        assert_eq!(stored.user_id, user);
        assert!(stored.details.unwrap().contains("## Daily Itinerary"));
        assert_eq!(store.plan_count().await, 1);
    }

    #[tokio::test]
    async fn test_settings_change_applies_to_next_call() {
        let server = stub::spawn(StubResponse::json(json!({"output": {"text": "qwen plan"}}))).await;
        let settings = Arc::new(SettingsStore::in_memory(Settings::default()));
        let planner = TravelPlanner::new(settings.clone());

        let first = planner.generate(&lisbon_request()).await.unwrap();
        assert_eq!(first.provider, ProviderKind::Mock);

        settings
            .set_provider(ProviderConfig::new(
                "sk-ds",
                server.url_with_path("/dashscope/generation"),
            ))
            .await
            .unwrap();

        let second = planner.generate(&lisbon_request()).await.unwrap();
        assert_eq!(second.provider, ProviderKind::DashscopeStyle);
        assert_eq!(second.plan.details, "qwen plan");
        assert_eq!(server.last_request().unwrap().body["model"], "qwen-turbo");
    }

    #[tokio::test]
    async fn test_model_override_reaches_openai_request() {
        let server = stub::spawn(StubResponse::json(json!({
            "choices": [{"message": {"content": "Day 1: Alfama"}}]
        })))
        .await;
        let planner =
            planner_with(ProviderConfig::new("sk-1", server.url()).with_model("gpt-4o-mini"));

        planner.generate(&lisbon_request()).await.unwrap();

        assert_eq!(server.last_request().unwrap().body["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_model_override_reaches_dashscope_request() {
        let server = stub::spawn(StubResponse::json(json!({"output": {"text": "ok"}}))).await;
        let planner = planner_with(
            ProviderConfig::new("sk-ds", server.url_with_path("/dashscope/generation"))
                .with_model("qwen-max"),
        );

        planner
            .analyze(&context(1000.0, &[("food", 100.0)]))
            .await
            .unwrap();

        assert_eq!(server.last_request().unwrap().body["model"], "qwen-max");
    }

    #[tokio::test]
    async fn test_mock_analysis_flags_dining() {
        let planner = planner_with(ProviderConfig::default());
        let report = planner
            .analyze(&context(1000.0, &[("food", 400.0)]))
            .await
            .unwrap();

        assert_eq!(report.provider, ProviderKind::Mock);
        assert!(report.advisories.contains(&Advisory::DiningHeavy { spent: 400.0 }));
        assert!(report
            .text
            .contains(&Advisory::DiningHeavy { spent: 400.0 }.to_string()));
    }

    #[tokio::test]
    async fn test_provider_analysis_keeps_local_aggregation() {
        let server = stub::spawn(StubResponse::json(json!({"output": {"text": "Looks fine."}}))).await;
        let planner = planner_with(ProviderConfig::new(
            "sk-ds",
            server.url_with_path("/api/v1/services/aliyuncs/generation"),
        ));

        let report = planner
            .analyze(&context(
                5000.0,
                &[("food", 150.0), ("transport", 80.0), ("shopping", 600.0)],
            ))
            .await
            .unwrap();

        assert_eq!(report.text, "Looks fine.");
        assert_eq!(report.provider, ProviderKind::DashscopeStyle);
        assert_eq!(report.summary.total_spent, 830.0);
        assert_eq!(report.advisories[0], Advisory::OnTrack);

        let body = server.last_request().unwrap().body;
        assert_eq!(body["parameters"]["temperature"], 0.3);
        assert!(body["input"]["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("- shopping: 600 (test)"));
    }

    #[tokio::test]
    async fn test_analyze_stored_plan() {
        let planner = planner_with(ProviderConfig::default());
        let store = InMemoryPlanStore::new();
        let plan = planner
            .generate_and_save(&store, Uuid::new_v4(), &lisbon_request())
            .await
            .unwrap();
        store
            .add_expense(plan.id, ExpenseRecord::new("shopping", 1200.0, "azulejos"))
            .await
            .unwrap();

        let report = planner.analyze_plan(&store, plan.id).await.unwrap();

        assert_eq!(report.summary.budget, 5000.0);
        assert!(report.advisories.contains(&Advisory::ShoppingHeavy { spent: 1200.0 }));
    }

    #[tokio::test]
    async fn test_analyze_unknown_plan() {
        let planner = planner_with(ProviderConfig::default());
        let store = InMemoryPlanStore::new();

        let result = planner.analyze_plan(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(PlanningError::Store(StoreError::PlanNotFound(_)))));
    }
}
