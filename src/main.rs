//! Command-line entry point.
//!
//! ```text
//! travel-planner plan <request.json>
//! travel-planner analyze <context.json>
//! ```
//!
//! Prints the caller envelope as JSON. Provider settings come from
//! `.travel-planner/settings.json` in the current directory, falling back to
//! `AI_API_KEY` / `AI_API_ENDPOINT`.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_planner::budget::BudgetContext;
use travel_planner::{Envelope, GenerationRequest, SettingsStore, TravelPlanner};

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (command, input) = match args.as_slice() {
        [_, command, input] => (command.as_str(), input.as_str()),
        _ => bail!("usage: travel-planner <plan|analyze> <input.json>"),
    };

    let working_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let settings = Arc::new(SettingsStore::new(&working_dir).await);
    let planner = TravelPlanner::new(settings);

    let envelope = match command {
        "plan" => {
            let request: GenerationRequest = read_json(input)?;
            Envelope::for_plan(&planner.generate(&request).await)
        }
        "analyze" => {
            let context: BudgetContext = read_json(input)?;
            Envelope::for_analysis(&planner.analyze(&context).await)
        }
        other => bail!("unknown command '{}', expected 'plan' or 'analyze'", other),
    };

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
