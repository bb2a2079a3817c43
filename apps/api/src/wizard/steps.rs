//! Assessment step catalog and the step-indicator rendering contract.

use serde::Serialize;

/// Number of sub-forms inside the assessment screen.
pub const TOTAL_STEPS: usize = 4;

/// Display copy for one assessment step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepInfo {
    pub title: &'static str,
    pub description: &'static str,
}

pub const STEPS: [StepInfo; TOTAL_STEPS] = [
    StepInfo {
        title: "Talents & Hard Skills",
        description: "What can you actually do? (e.g. Sprinting, Cooking, Sales, Coding, Public Speaking)",
    },
    StepInfo {
        title: "Passions & Interests",
        description: "What would you do for free? (e.g. Football, Fashion, Investing, Space, Nature)",
    },
    StepInfo {
        title: "Work Nature & Style",
        description: "Describe your temperament and strengths.",
    },
    StepInfo {
        title: "Logistics & Preferences",
        description: "Education and work environment.",
    },
];

/// Rendering contract for the wizard progress bar: one marker per step plus
/// a connector between each pair of consecutive markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    /// `markers[i]` is true when step `i` is completed or current.
    pub markers: Vec<bool>,
    /// `connectors[i]` joins markers `i` and `i + 1`; true once step `i` is behind.
    pub connectors: Vec<bool>,
}

/// Pure function of `(current_step, total_steps)`. No clamping: out-of-range
/// input degrades to an all-completed rendering rather than erroring.
pub fn step_indicator(current_step: usize, total_steps: usize) -> StepIndicator {
    StepIndicator {
        markers: (0..total_steps).map(|idx| idx <= current_step).collect(),
        connectors: (0..total_steps.saturating_sub(1))
            .map(|idx| idx < current_step)
            .collect(),
    }
}
