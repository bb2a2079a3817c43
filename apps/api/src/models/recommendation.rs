//! Career recommendation shapes returned by the AI backend.
//!
//! Immutable once received: a successful analysis replaces the session's
//! result set wholesale, and a reset discards it. Wire names are camelCase
//! to match the structured-output contract sent to the backend.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Demand labels the backend is asked for. Received as free text, so this
/// is advisory, not a closed enum.
pub const MARKET_DEMAND_LEVELS: &[&str] = &["Low", "Medium", "High"];

/// One monthly milestone within a recommendation's 6-month plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub month: String,
    pub milestone: String,
    pub resources: Vec<String>,
}

/// One AI-suggested career path with supporting detail and a roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub role: String,
    pub description: String,
    pub match_percentage: f64,
    pub salary_range: String,
    /// Expected to be one of `MARKET_DEMAND_LEVELS`; rendered verbatim.
    pub market_demand: String,
    pub skills_to_learn: Vec<String>,
    pub roadmap: Vec<RoadmapStep>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Range checks on a parsed result set. A match percentage outside 0–100 is
/// an error; an off-catalog demand label is only logged, since the backend's
/// wording is not authoritative.
pub fn validate_recommendations(recommendations: &[CareerRecommendation]) -> Result<(), String> {
    for rec in recommendations {
        if !(0.0..=100.0).contains(&rec.match_percentage) {
            return Err(format!(
                "match percentage {} out of range for '{}'",
                rec.match_percentage, rec.role
            ));
        }
        if !MARKET_DEMAND_LEVELS.contains(&rec.market_demand.as_str()) {
            warn!(
                "unexpected market demand label '{}' for '{}'",
                rec.market_demand, rec.role
            );
        }
    }
    Ok(())
}
