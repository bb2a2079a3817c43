// Prompt and structured-output contract for the career recommendation call.

use serde_json::{json, Value};

use crate::models::profile::UserProfile;

/// Career recommendation prompt. Placeholders are filled from the submitted
/// profile by `build_career_prompt`. The industry list is deliberate: the
/// backend must not collapse every profile into tech roles.
pub const CAREER_PROMPT_TEMPLATE: &str = r#"You are a world-class career strategist. Analyze this profile and recommend the top 3 career paths.
CRITICAL: Do NOT bias toward technology/coding. Explore ALL industries including:
- Physical/Athletic (Sports, Personal Training, Outdoors, Defense)
- Business & Entrepreneurship (Sales, Strategy, Finance, Real Estate)
- Skilled Trades & Crafts (Culinary, Carpentry, Aviation, Automotive)
- Creative & Performing Arts (Design, Music, Acting, Writing)
- Social & Scientific (Medicine, Psychology, Research, Education)

Profile:
- Talents/Skills: {skills}
- Interests/Passions: {interests}
- Education: {education}
- Experience: {experience}
- Work Environment: {work_preference}
- Personality/Style: {traits}

Provide a detailed analysis including match percentage, salary range (use market data), market demand, and a specific 6-month roadmap for each path."#;

/// Fills the prompt template from a profile. List fields are comma-joined;
/// unset education renders empty, which is what the assessment surface allows.
pub fn build_career_prompt(profile: &UserProfile) -> String {
    let traits: Vec<&str> = profile
        .personality_traits
        .iter()
        .map(|t| t.as_str())
        .collect();

    CAREER_PROMPT_TEMPLATE
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{interests}", &profile.interests.join(", "))
        .replace(
            "{education}",
            profile.education.map(|e| e.as_str()).unwrap_or(""),
        )
        .replace("{experience}", &profile.experience_level)
        .replace("{work_preference}", profile.work_preference.as_str())
        .replace("{traits}", &traits.join(", "))
}

/// Response schema sent with every recommendation request: an array of
/// recommendation objects with every field required, including the nested
/// roadmap entry shape.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "role": { "type": "STRING" },
                "description": { "type": "STRING" },
                "matchPercentage": { "type": "NUMBER" },
                "salaryRange": { "type": "STRING" },
                "marketDemand": { "type": "STRING" },
                "skillsToLearn": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "roadmap": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "month": { "type": "STRING" },
                            "milestone": { "type": "STRING" },
                            "resources": {
                                "type": "ARRAY",
                                "items": { "type": "STRING" }
                            }
                        },
                        "required": ["month", "milestone", "resources"]
                    }
                },
                "pros": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "cons": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            },
            "required": [
                "role", "description", "matchPercentage", "salaryRange",
                "marketDemand", "skillsToLearn", "roadmap", "pros", "cons"
            ]
        }
    })
}
