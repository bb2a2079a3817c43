//! User profile — the record of self-reported attributes built up through
//! the assessment wizard, owned by the session for its lifetime.
//!
//! The catalogs offered by the assessment surface (traits, education levels,
//! work preferences) are closed enums: unrecognized labels are rejected when
//! a request body is deserialized, not somewhere deeper in the service.

use serde::{Deserialize, Serialize};

/// Personality trait catalog offered on the work-style step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalityTrait {
    #[serde(rename = "Highly Active")]
    HighlyActive,
    #[serde(rename = "High Stakes")]
    HighStakes,
    #[serde(rename = "People Oriented")]
    PeopleOriented,
    Creative,
    Competitive,
    Analytical,
}

impl PersonalityTrait {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityTrait::HighlyActive => "Highly Active",
            PersonalityTrait::HighStakes => "High Stakes",
            PersonalityTrait::PeopleOriented => "People Oriented",
            PersonalityTrait::Creative => "Creative",
            PersonalityTrait::Competitive => "Competitive",
            PersonalityTrait::Analytical => "Analytical",
        }
    }
}

/// Education level catalog offered on the logistics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "Self-Taught / Experience Only")]
    SelfTaught,
    #[serde(rename = "Trade School / Certification")]
    TradeSchool,
    #[serde(rename = "Associate / Bachelor Degree")]
    Bachelor,
    #[serde(rename = "Master / Professional License")]
    Master,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::SelfTaught => "Self-Taught / Experience Only",
            EducationLevel::TradeSchool => "Trade School / Certification",
            EducationLevel::Bachelor => "Associate / Bachelor Degree",
            EducationLevel::Master => "Master / Professional License",
        }
    }
}

/// Work-location preference. Always has a value; new sessions start Hybrid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkPreference {
    Remote,
    #[default]
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
    #[serde(rename = "Field Work")]
    FieldWork,
}

impl WorkPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkPreference::Remote => "Remote",
            WorkPreference::Hybrid => "Hybrid",
            WorkPreference::OnSite => "On-site",
            WorkPreference::FieldWork => "Field Work",
        }
    }
}

/// The two free-text tag sequences on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagField {
    Skills,
    Interests,
}

/// One user's self-reported attributes.
///
/// Invariant: `skills` and `interests` hold no duplicates and no
/// empty/whitespace-only entries; insertion order is preserved for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub education: Option<EducationLevel>,
    pub experience_level: String,
    pub work_preference: WorkPreference,
    pub personality_traits: Vec<PersonalityTrait>,
}

impl UserProfile {
    /// Appends a trimmed tag iff it is non-empty and not already present
    /// (exact match). Returns whether anything was added.
    pub fn add_tag(&mut self, field: TagField, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let tags = self.tags_mut(field);
        if tags.iter().any(|t| t == value) {
            return false;
        }
        tags.push(value.to_string());
        true
    }

    /// Removes the matching tag, if present. Returns whether anything was
    /// removed. Surviving entries keep their relative order.
    pub fn remove_tag(&mut self, field: TagField, value: &str) -> bool {
        let tags = self.tags_mut(field);
        let before = tags.len();
        tags.retain(|t| t != value);
        tags.len() != before
    }

    /// Toggles membership of a trait. Returns whether the trait is present
    /// afterwards.
    pub fn toggle_trait(&mut self, label: PersonalityTrait) -> bool {
        if let Some(pos) = self.personality_traits.iter().position(|t| *t == label) {
            self.personality_traits.remove(pos);
            false
        } else {
            self.personality_traits.push(label);
            true
        }
    }

    pub fn tags(&self, field: TagField) -> &[String] {
        match field {
            TagField::Skills => &self.skills,
            TagField::Interests => &self.interests,
        }
    }

    fn tags_mut(&mut self, field: TagField) -> &mut Vec<String> {
        match field {
            TagField::Skills => &mut self.skills,
            TagField::Interests => &mut self.interests,
        }
    }
}
