//! Text rendering of command results

use std::fmt::Write;

use application::{ItineraryPlan, TransportOutcome, TransportResult};
use domain::{ItineraryLeg, TransportOption};

/// One line per estimated option, indented
pub fn options_block(options: &[TransportOption]) -> String {
    options.iter().fold(String::new(), |mut out, option| {
        let _ = writeln!(out, "  {option}");
        out
    })
}

fn leg_header(leg: &ItineraryLeg, result: &TransportResult) -> String {
    let route = format!(
        "Step {}: {} → {}",
        result.step_id, leg.origin.name, leg.destination.name
    );
    match &result.outcome {
        TransportOutcome::Live { .. } => format!("{route} (live)"),
        TransportOutcome::Estimated {
            distance_km,
            reason,
            ..
        } => format!("{route} ({distance_km:.2} km, estimated: {reason})"),
        TransportOutcome::Unavailable => format!("{route} (unavailable)"),
    }
}

/// Human-readable itinerary plan
pub fn plan_text(plan: &ItineraryPlan) -> String {
    let mut out = String::new();
    if let Some(city) = &plan.itinerary.city {
        let _ = writeln!(out, "🗺️  Itinerary in {city}");
    }

    let legs = plan.itinerary.legs();
    for (leg, result) in legs.iter().zip(&plan.legs) {
        let _ = writeln!(out, "{}", leg_header(leg, result));
        for line in result.option_lines() {
            let _ = writeln!(out, "  {line}");
        }
        if let Some(error) = &result.error {
            let _ = writeln!(out, "  ⚠️  {error}");
        }
    }

    let summary = &plan.summary;
    let _ = writeln!(
        out,
        "📏 Total distance: {:.2} km over {} of {} legs",
        summary.total_distance_km, summary.measured_legs, summary.leg_count
    );
    let _ = writeln!(out, "🚶 Walking time: {}", summary.walking);
    out
}
