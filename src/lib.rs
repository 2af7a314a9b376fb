//! # Travel Planner
//!
//! AI-assisted itinerary generation and travel budget analysis.
//!
//! This library provides:
//! - Provider-abstracted itinerary generation (OpenAI-style and Dashscope-style
//!   endpoints)
//! - A deterministic fallback used whenever no provider is configured
//! - Expense aggregation with rule-based budget advisories
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────────────────────────┐
//!        │          TravelPlanner           │
//!        │  (prompts, selection, dispatch)  │
//!        └───────┬──────────────────┬───────┘
//!                │                  │
//!                ▼                  ▼
//!     ┌─────────────────┐  ┌─────────────────┐
//!     │ ProviderAdapter │  │  Mock generator │
//!     │ (OpenAI / DS)   │  │  + budget rules │
//!     └─────────────────┘  └─────────────────┘
//! ```
//!
//! ## Modules
//! - `llm`: provider selection, adapters and error classification
//! - `travel`: requests, prompts, mock synthesis and the planner
//! - `budget`: expense aggregation, advisories and budget allocation
//! - `store`: plan persistence contract
//! - `settings` / `config`: provider configuration

pub mod budget;
pub mod config;
pub mod llm;
pub mod settings;
pub mod store;
pub mod travel;

pub use config::{Config, NarrativeLanguage, ProviderConfig};
pub use settings::{Settings, SettingsStore, SharedSettingsStore};
pub use travel::{Envelope, GenerationRequest, TravelPlanner};
