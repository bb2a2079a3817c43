//! Wizard Controller — the screen state machine owning one assessment session.
//!
//! Screens: Welcome → Assessment → Analyzing → Results, with the recovery
//! edge Analyzing → Assessment when the analysis fails. Every transition and
//! every profile mutation goes through a named operation on `WizardSession`;
//! nothing outside this module assigns session fields directly.

pub mod handlers;
pub mod steps;

use serde::Serialize;
use thiserror::Error;

use crate::models::profile::{
    EducationLevel, PersonalityTrait, TagField, UserProfile, WorkPreference,
};
use crate::models::recommendation::CareerRecommendation;
use crate::wizard::steps::{step_indicator, StepIndicator, StepInfo, STEPS, TOTAL_STEPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Welcome,
    Assessment,
    Analyzing,
    Results,
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{operation} is not available on the {screen:?} screen")]
    InvalidScreen {
        operation: &'static str,
        screen: Screen,
    },

    #[error("an analysis is already in progress")]
    SubmissionInFlight,
}

/// Proof token for one submission. A completion carrying a stale ticket
/// (the session was reset, or a newer submission started) is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// Outcome of the continue action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAdvance {
    Moved(usize),
    /// Already on the final step — continue submits instead of advancing.
    FinalStep,
}

#[derive(Debug)]
pub struct WizardSession {
    screen: Screen,
    step: usize,
    profile: UserProfile,
    results: Vec<CareerRecommendation>,
    generation: u64,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            step: 0,
            profile: UserProfile::default(),
            results: Vec::new(),
            generation: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn results(&self) -> &[CareerRecommendation] {
        &self.results
    }

    pub fn start_assessment(&mut self) -> Result<(), WizardError> {
        self.expect_screen(Screen::Welcome, "start_assessment")?;
        self.screen = Screen::Assessment;
        Ok(())
    }

    /// Decrements the step, floored at 0.
    pub fn step_back(&mut self) -> Result<usize, WizardError> {
        self.expect_screen(Screen::Assessment, "step_back")?;
        self.step = self.step.saturating_sub(1);
        Ok(self.step)
    }

    /// Increments the step. On the final step the counter stays put and the
    /// caller is told to run the submission instead.
    pub fn advance_step(&mut self) -> Result<StepAdvance, WizardError> {
        self.expect_screen(Screen::Assessment, "advance_step")?;
        if self.step + 1 < TOTAL_STEPS {
            self.step += 1;
            Ok(StepAdvance::Moved(self.step))
        } else {
            Ok(StepAdvance::FinalStep)
        }
    }

    pub fn add_tag(&mut self, field: TagField, value: &str) -> Result<bool, WizardError> {
        self.expect_screen(Screen::Assessment, "add_tag")?;
        Ok(self.profile.add_tag(field, value))
    }

    pub fn remove_tag(&mut self, field: TagField, value: &str) -> Result<bool, WizardError> {
        self.expect_screen(Screen::Assessment, "remove_tag")?;
        Ok(self.profile.remove_tag(field, value))
    }

    pub fn toggle_trait(&mut self, label: PersonalityTrait) -> Result<bool, WizardError> {
        self.expect_screen(Screen::Assessment, "toggle_trait")?;
        Ok(self.profile.toggle_trait(label))
    }

    pub fn set_education(&mut self, education: Option<EducationLevel>) -> Result<(), WizardError> {
        self.expect_screen(Screen::Assessment, "set_education")?;
        self.profile.education = education;
        Ok(())
    }

    pub fn set_experience_level(&mut self, experience: String) -> Result<(), WizardError> {
        self.expect_screen(Screen::Assessment, "set_experience_level")?;
        self.profile.experience_level = experience;
        Ok(())
    }

    pub fn set_work_preference(&mut self, preference: WorkPreference) -> Result<(), WizardError> {
        self.expect_screen(Screen::Assessment, "set_work_preference")?;
        self.profile.work_preference = preference;
        Ok(())
    }

    /// Moves to Analyzing and hands back a copy of the profile to analyze
    /// plus the ticket the completion must present. Non-reentrant: a second
    /// submission while one is analyzing is refused.
    pub fn begin_submission(
        &mut self,
    ) -> Result<(UserProfile, SubmissionTicket), WizardError> {
        match self.screen {
            Screen::Analyzing => return Err(WizardError::SubmissionInFlight),
            Screen::Assessment => {}
            screen => {
                return Err(WizardError::InvalidScreen {
                    operation: "submit",
                    screen,
                })
            }
        }
        self.screen = Screen::Analyzing;
        self.generation += 1;
        Ok((self.profile.clone(), SubmissionTicket(self.generation)))
    }

    /// Stores the results wholesale and shows them. Returns false — changing
    /// nothing — when the ticket is stale.
    pub fn apply_results(
        &mut self,
        ticket: SubmissionTicket,
        results: Vec<CareerRecommendation>,
    ) -> bool {
        if !self.ticket_is_current(ticket) {
            return false;
        }
        self.results = results;
        self.screen = Screen::Results;
        true
    }

    /// Returns to the editable assessment with the profile intact. Returns
    /// false when the ticket is stale.
    pub fn fail_submission(&mut self, ticket: SubmissionTicket) -> bool {
        if !self.ticket_is_current(ticket) {
            return false;
        }
        self.screen = Screen::Assessment;
        true
    }

    /// Discards everything and returns to the welcome screen. Bumping the
    /// generation invalidates any submission still in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.screen = Screen::Welcome;
        self.step = 0;
        self.profile = UserProfile::default();
        self.results.clear();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            screen: self.screen,
            step: self.step,
            total_steps: TOTAL_STEPS,
            step_info: STEPS[self.step],
            indicator: step_indicator(self.step, TOTAL_STEPS),
            profile: self.profile.clone(),
            results: self.results.clone(),
        }
    }

    fn ticket_is_current(&self, ticket: SubmissionTicket) -> bool {
        self.screen == Screen::Analyzing && ticket.0 == self.generation
    }

    fn expect_screen(
        &self,
        expected: Screen,
        operation: &'static str,
    ) -> Result<(), WizardError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidScreen {
                operation,
                screen: self.screen,
            })
        }
    }
}

/// Everything the frontend needs to render the current screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub screen: Screen,
    pub step: usize,
    pub total_steps: usize,
    pub step_info: StepInfo,
    pub indicator: StepIndicator,
    pub profile: UserProfile,
    pub results: Vec<CareerRecommendation>,
}
