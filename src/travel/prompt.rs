//! Prompt construction.
//!
//! Both builders are total: any input renders literally. The section
//! headings requested from the provider are the same ones the mock
//! generator emits, so downstream rendering never depends on which path
//! produced the text.

use crate::budget::{aggregate, BudgetContext};
use crate::config::NarrativeLanguage;
use crate::llm::PromptPair;

use super::GenerationRequest;

/// Marker substituted for empty preferences.
pub const NO_PREFERENCE: &str = "no special preference";

/// Section headings of an itinerary, in order.
pub const PLAN_SECTIONS: [&str; 6] = [
    "Trip Overview",
    "Daily Itinerary",
    "Lodging Recommendations",
    "Food Recommendations",
    "Budget Allocation",
    "Practical Tips",
];

/// Section headings of a budget report, in order.
pub const REPORT_SECTIONS: [&str; 4] = [
    "Budget Overview",
    "Category Breakdown",
    "Assessment",
    "Optimization Tips",
];

pub fn plan_system_prompt(language: NarrativeLanguage) -> String {
    format!(
        "You are a professional travel planner who writes detailed itineraries tailored to the \
         traveler's needs. Reply in {}, with a structured and easy-to-read plan.",
        language.display_name()
    )
}

pub fn analysis_system_prompt(language: NarrativeLanguage) -> String {
    format!(
        "You are a professional financial analyst specialising in travel budgets. Reply in {}, \
         with a structured and easy-to-read budget analysis report.",
        language.display_name()
    )
}

/// User prompt asking for an itinerary.
pub fn build_generation_prompt(request: &GenerationRequest, language: NarrativeLanguage) -> String {
    let preferences = if request.preferences.trim().is_empty() {
        NO_PREFERENCE
    } else {
        request.preferences.as_str()
    };

    format!(
        "Please create a detailed travel plan for the following trip:\n\
         \n\
         Destination: {destination}\n\
         Dates: {start} to {end}\n\
         Budget: {budget}\n\
         Travelers: {travelers}\n\
         Preferences: {preferences}\n\
         \n\
         Please provide:\n\
         1. A daily itinerary (sights, transport, timing)\n\
         2. Lodging recommendations (type and area)\n\
         3. Food recommendations (local restaurants and snacks)\n\
         4. A suggested budget allocation\n\
         5. Practical tips (best season, customs, precautions)\n\
         \n\
         Requirements:\n\
         - Reply in {language}\n\
         - Use these section headings in order: {sections}\n\
         - Keep the plan practical and within budget\n\
         - Refer to specific dates where possible\n",
        destination = request.destination,
        start = request.start_date,
        end = request.end_date,
        budget = request.budget,
        travelers = request.traveler_count,
        preferences = preferences,
        language = language.display_name(),
        sections = PLAN_SECTIONS.join(", "),
    )
}

/// User prompt asking for a budget report.
pub fn build_analysis_prompt(context: &BudgetContext, language: NarrativeLanguage) -> String {
    let summary = aggregate(context);

    let mut prompt = format!(
        "Please write a detailed budget analysis for the following trip and expenses:\n\
         \n\
         Trip:\n\
         - Destination: {}\n\
         - Total budget: {}\n\
         - Dates: {} to {}\n\
         \n\
         Expenses:\n",
        context.destination, context.budget, context.start_date, context.end_date
    );

    for expense in &context.expenses {
        prompt.push_str(&format!(
            "- {}: {} ({})\n",
            expense.category, expense.amount, expense.description
        ));
    }

    prompt.push_str(&format!(
        "\n\
         Total spent: {}\n\
         Remaining budget: {}\n\
         \n\
         Please provide:\n\
         1. A budget overview (total budget, spent, remaining, usage rate)\n\
         2. A category breakdown (share of each category)\n\
         3. An assessment of how the budget is being used\n\
         4. Concrete optimization advice and reminders\n\
         \n\
         Requirements:\n\
         - Reply in {}\n\
         - Use these section headings in order: {}\n\
         - If spending is over budget or at risk of going over, give an explicit warning\n\
         - Offer practical budget management advice\n",
        summary.total_spent,
        summary.remaining,
        language.display_name(),
        REPORT_SECTIONS.join(", ")
    ));
    prompt
}

/// Prompt pair for itinerary generation.
pub fn generation_prompts(request: &GenerationRequest, language: NarrativeLanguage) -> PromptPair {
    PromptPair::new(
        plan_system_prompt(language),
        build_generation_prompt(request, language),
    )
}

/// Prompt pair for budget analysis.
pub fn analysis_prompts(context: &BudgetContext, language: NarrativeLanguage) -> PromptPair {
    PromptPair::new(
        analysis_system_prompt(language),
        build_analysis_prompt(context, language),
    )
}
