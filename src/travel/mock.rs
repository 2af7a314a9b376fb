//! Deterministic, network-free generation.
//!
//! Used whenever no provider is configured. Output carries the same section
//! headings the provider is asked for.

use serde_json::json;

use crate::budget::{advise, aggregate, Advisory, BudgetAllocation, BudgetContext, BudgetSummary};
use crate::llm::Completion;

use super::prompt::{PLAN_SECTIONS, REPORT_SECTIONS};
use super::GenerationRequest;

/// Day title and (time of day, activity) lines.
type DayTemplate = (&'static str, &'static [(&'static str, &'static str)]);

const DAYS: [DayTemplate; 5] = [
    (
        "Arrival and settling in",
        &[
            ("Morning", "Arrive in {dest} and check in to your hotel"),
            ("Afternoon", "Take an easy walk around the neighbourhood"),
            ("Evening", "Try the local specialities"),
        ],
    ),
    (
        "Classic sightseeing",
        &[
            ("Morning", "Visit the city's signature landmark"),
            ("Afternoon", "Explore the historic quarter"),
            ("Evening", "Free time or a local show"),
        ],
    ),
    (
        "Deep experience",
        &[
            ("Morning", "Join a local cultural workshop or guided tour"),
            ("Afternoon", "Shopping or leisure time"),
            ("Evening", "Dinner at a well-known local restaurant"),
        ],
    ),
    (
        "Nature",
        &[
            ("All day", "Day trip to a nearby scenic area"),
            ("Evening", "Return to the city and rest"),
        ],
    ),
    (
        "Departure",
        &[
            ("Morning", "Free time and souvenir shopping"),
            ("Afternoon", "Head to the airport or station"),
        ],
    ),
];

const OPTIMIZATION_TIPS: [&str; 4] = [
    "Record expenses as they happen with a budgeting app",
    "Set a daily spending reminder",
    "Look for free or low-cost alternative activities",
    "Book tickets and transport in advance for discounts",
];

/// Synthesize an itinerary. Never fails.
pub fn mock_plan(request: &GenerationRequest) -> Completion {
    let dest = &request.destination;
    let preferences = if request.preferences.trim().is_empty() {
        "none"
    } else {
        request.preferences.as_str()
    };

    let mut out = format!(
        "# {dest} Travel Plan ({start} - {end})\n\
         \n\
         ## {overview}\n\
         - Destination: {dest}\n\
         - Dates: {start} to {end}\n\
         - Budget: {budget:.2}\n\
         - Travelers: {travelers}\n\
         - Preferences: {preferences}\n\
         \n\
         ## {itinerary}\n",
        dest = dest,
        start = request.start_date,
        end = request.end_date,
        overview = PLAN_SECTIONS[0],
        budget = request.budget,
        travelers = request.traveler_count,
        preferences = preferences,
        itinerary = PLAN_SECTIONS[1],
    );

    for (i, (title, slots)) in DAYS.iter().enumerate() {
        out.push_str(&format!("\n### Day {}: {}\n", i + 1, title));
        for (when, what) in slots.iter() {
            out.push_str(&format!("- {}: {}\n", when, what.replace("{dest}", dest)));
        }
    }

    out.push_str(&format!(
        "\n## {lodging}\n\
         - City-centre business hotel (convenient for getting around)\n\
         - A characterful guesthouse for a local feel\n\
         \n\
         ## {food}\n\
         - Local signature dishes in {dest}\n\
         - Street food and market stalls\n\
         \n\
         ## {allocation}\n",
        lodging = PLAN_SECTIONS[2],
        food = PLAN_SECTIONS[3],
        dest = dest,
        allocation = PLAN_SECTIONS[4],
    ));
    for (label, amount) in BudgetAllocation::split(request.budget).lines() {
        out.push_str(&format!("- {}: {:.1}\n", label, amount));
    }

    out.push_str(&format!(
        "\n## {}\n\
         - Check the best season to visit\n\
         - Read up on local customs\n\
         - Keep emergency contacts at hand\n",
        PLAN_SECTIONS[5]
    ));

    Completion {
        text: out,
        raw: json!({"mock": true}),
    }
}

/// Synthesize a budget report from the shared aggregation. Never fails.
pub fn mock_analysis(context: &BudgetContext) -> Completion {
    let summary = aggregate(context);
    let advisories = advise(&summary);

    Completion {
        text: render_report(&summary, &advisories),
        raw: json!({"mock": true}),
    }
}

fn percent(share: Option<f64>) -> String {
    match share {
        Some(share) => format!("{:.1}%", share * 100.0),
        None => "n/a".to_string(),
    }
}

fn render_report(summary: &BudgetSummary, advisories: &[Advisory]) -> String {
    let mut out = format!(
        "# Travel Budget Analysis Report\n\
         \n\
         ## {}\n\
         - Total budget: {:.2}\n\
         - Spent: {:.2}\n\
         - Remaining: {:.2}\n\
         - Usage rate: {}\n\
         \n\
         ## {}\n",
        REPORT_SECTIONS[0],
        summary.budget,
        summary.total_spent,
        summary.remaining,
        percent(summary.usage_ratio),
        REPORT_SECTIONS[1]
    );

    if summary.categories.is_empty() {
        out.push_str("- No expenses recorded yet\n");
    }
    for (category, amount) in summary.categories.iter() {
        out.push_str(&format!(
            "- {}: {:.2} ({})\n",
            category,
            amount,
            percent(summary.share_of_budget(amount))
        ));
    }

    out.push_str(&format!("\n## {}\n", REPORT_SECTIONS[2]));
    for advisory in advisories {
        let marker = match advisory {
            a if a.is_warning() => "⚠️",
            Advisory::OnTrack => "✅",
            _ => "-",
        };
        out.push_str(&format!("{} {}\n", marker, advisory));
    }

    out.push_str(&format!("\n## {}\n", REPORT_SECTIONS[3]));
    for (i, tip) in OPTIMIZATION_TIPS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, tip));
    }

    out
}
