use serde::{Deserialize, Serialize};

use super::{CanonicalProfile, Communication, Flexibility};

/// Short display labels shown on candidate cards.
///
/// Derived from the canonical profile, first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaLabels {
    pub personality: String,
    pub work_style: String,
    pub cofounder_preference: String,
}

impl PersonaLabels {
    pub fn derive(profile: &CanonicalProfile) -> Self {
        Self {
            personality: personality_label(profile).to_string(),
            work_style: work_style_label(profile).to_string(),
            cofounder_preference: cofounder_preference_label(profile).to_string(),
        }
    }
}

fn personality_label(profile: &CanonicalProfile) -> &'static str {
    let traits = &profile.personality;
    if traits.extraversion >= 4 {
        "Extrovert"
    } else if traits.extraversion <= 2 {
        "Introvert"
    } else if traits.openness >= 4 {
        "Creative"
    } else if traits.conscientiousness >= 4 {
        "Analytical"
    } else {
        "Balanced"
    }
}

fn work_style_label(profile: &CanonicalProfile) -> &'static str {
    match profile.communication {
        Communication::Async => "Async",
        Communication::DailyCheckin => "Real-time",
        _ if profile.availability_flexibility == Flexibility::VeryFlexible => "Flexible",
        _ => "Structured",
    }
}

fn cofounder_preference_label(profile: &CanonicalProfile) -> &'static str {
    if profile.has_role("technical") {
        "Tech Cofounder"
    } else if profile.has_role("sales") || profile.has_role("marketer") {
        "Business Cofounder"
    } else if profile.has_role("designer") {
        "Design Cofounder"
    } else {
        "Flexible"
    }
}
