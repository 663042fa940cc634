//! Canonical cofounder profile types.
//!
//! A [`CanonicalProfile`] is the only shape the scorer accepts. Raw survey
//! answers and stored records are turned into one by the normalizer in
//! [`normalize`], which never fails: anything it does not recognize falls back
//! to the neutral value documented on each type.

mod labels;
mod normalize;
mod persona;
mod record;

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use labels::{motivation_code, role_code};
pub use normalize::{RawAnswers, normalize, normalize_record};
pub use persona::PersonaLabels;
pub use record::RawProfileRecord;

/// Motivation vocabulary offered by the onboarding survey.
pub const MOTIVATIONS: [&str; 5] = ["freedom", "impact", "wealth", "learning", "collaboration"];

/// Role vocabulary. The survey offers the first seven; the rest appear in
/// older stored records.
pub const ROLES: [&str; 10] = [
    "visionary",
    "operator",
    "technical",
    "designer",
    "marketer",
    "sales",
    "generalist",
    "business",
    "product",
    "finance",
];

// ---------------------------------------------------------------------------
// Personality traits
// ---------------------------------------------------------------------------

/// Big Five trait scores on the survey's 6-point scale.
///
/// Values are clamped to 1-6 on construction and during deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PersonalityTraits {
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub openness: u8,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub conscientiousness: u8,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub extraversion: u8,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub agreeableness: u8,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub neuroticism: u8,
}

impl PersonalityTraits {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;
    pub const NEUTRAL: u8 = 3;

    /// Build a trait set, clamping every value into range.
    pub fn new(
        openness: u8,
        conscientiousness: u8,
        extraversion: u8,
        agreeableness: u8,
        neuroticism: u8,
    ) -> Self {
        Self {
            openness: clamp_trait(openness),
            conscientiousness: clamp_trait(conscientiousness),
            extraversion: clamp_trait(extraversion),
            agreeableness: clamp_trait(agreeableness),
            neuroticism: clamp_trait(neuroticism),
        }
    }
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self::new(
            Self::NEUTRAL,
            Self::NEUTRAL,
            Self::NEUTRAL,
            Self::NEUTRAL,
            Self::NEUTRAL,
        )
    }
}

fn clamp_trait(value: u8) -> u8 {
    value.clamp(PersonalityTraits::MIN, PersonalityTraits::MAX)
}

fn neutral_trait() -> u8 {
    PersonalityTraits::NEUTRAL
}

/// Convert a raw numeric answer into a trait score.
///
/// Zero and non-finite values count as unanswered.
pub(crate) fn trait_from_f64(raw: f64) -> Option<u8> {
    if !raw.is_finite() || raw == 0.0 {
        return None;
    }
    let clamped = raw.round().clamp(
        f64::from(PersonalityTraits::MIN),
        f64::from(PersonalityTraits::MAX),
    );
    Some(clamped as u8)
}

fn deserialize_trait<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize::trait_from_value(&value).unwrap_or(PersonalityTraits::NEUTRAL))
}

// ---------------------------------------------------------------------------
// Enumerated preferences
// ---------------------------------------------------------------------------

/// How a person handles disagreement. Defaults to `indirect`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStyle {
    Direct,
    #[default]
    Indirect,
    Avoidant,
    Internalize,
}

impl ConflictStyle {
    pub const ALL: [Self; 4] = [
        Self::Direct,
        Self::Indirect,
        Self::Avoidant,
        Self::Internalize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Indirect => "indirect",
            Self::Avoidant => "avoidant",
            Self::Internalize => "internalize",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(code.trim()))
    }
}

/// Weekly time commitment. Defaults to `depends`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Availability {
    #[serde(rename = "nights_weekends")]
    NightsWeekends,
    #[serde(rename = "10_20")]
    TenToTwenty,
    #[serde(rename = "20_40")]
    TwentyToForty,
    #[serde(rename = "full_time")]
    FullTime,
    #[default]
    #[serde(rename = "depends")]
    Depends,
}

impl Availability {
    pub const ALL: [Self; 5] = [
        Self::NightsWeekends,
        Self::TenToTwenty,
        Self::TwentyToForty,
        Self::FullTime,
        Self::Depends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NightsWeekends => "nights_weekends",
            Self::TenToTwenty => "10_20",
            Self::TwentyToForty => "20_40",
            Self::FullTime => "full_time",
            Self::Depends => "depends",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(code.trim()))
    }
}

/// How much the stated availability can bend. Defaults to `slightly_flexible`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Flexibility {
    Rigid,
    #[default]
    SlightlyFlexible,
    VeryFlexible,
}

impl Flexibility {
    pub const ALL: [Self; 3] = [Self::Rigid, Self::SlightlyFlexible, Self::VeryFlexible];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rigid => "rigid",
            Self::SlightlyFlexible => "slightly_flexible",
            Self::VeryFlexible => "very_flexible",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(code.trim()))
    }
}

/// Most productive time of day. Collected and displayed, never scored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Chronotype {
    Morning,
    Midday,
    Night,
    #[default]
    Flexible,
}

impl Chronotype {
    pub const ALL: [Self; 4] = [Self::Morning, Self::Midday, Self::Night, Self::Flexible];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Night => "night",
            Self::Flexible => "flexible",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(code.trim()))
    }
}

/// Preferred team communication cadence. Defaults to `depends`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Communication {
    Async,
    WeeklySync,
    DailyCheckin,
    #[default]
    Depends,
}

impl Communication {
    pub const ALL: [Self; 4] = [
        Self::Async,
        Self::WeeklySync,
        Self::DailyCheckin,
        Self::Depends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Async => "async",
            Self::WeeklySync => "weekly_sync",
            Self::DailyCheckin => "daily_checkin",
            Self::Depends => "depends",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(code.trim()))
    }
}

macro_rules! display_as_code {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_code!(ConflictStyle, Availability, Flexibility, Chronotype, Communication);

// ---------------------------------------------------------------------------
// The canonical profile
// ---------------------------------------------------------------------------

/// A fully populated profile, ready for scoring.
///
/// The scorer only reads it. `display_name`, `chronotype`, `team_style`,
/// `cofounder_frustration` and `updated_at` are descriptive and never affect a
/// score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub personality: PersonalityTraits,
    #[serde(default)]
    pub conflict_style: ConflictStyle,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub availability_flexibility: Flexibility,
    #[serde(default)]
    pub chronotype: Chronotype,
    #[serde(default)]
    pub communication: Communication,
    #[serde(default)]
    pub motivations: BTreeSet<String>,
    #[serde(default)]
    pub top_motivation: String,
    #[serde(default)]
    pub roles: BTreeSet<String>,
    #[serde(default)]
    pub preferred_role: String,
    #[serde(default)]
    pub team_style: String,
    #[serde(default)]
    pub cofounder_frustration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CanonicalProfile {
    /// A profile with every field at its neutral default.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            personality: PersonalityTraits::default(),
            conflict_style: ConflictStyle::default(),
            availability: Availability::default(),
            availability_flexibility: Flexibility::default(),
            chronotype: Chronotype::default(),
            communication: Communication::default(),
            motivations: BTreeSet::new(),
            top_motivation: String::new(),
            roles: BTreeSet::new(),
            preferred_role: String::new(),
            team_style: String::new(),
            cofounder_frustration: String::new(),
            updated_at: None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Name to show in listings, falling back to the id.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}

/// Candidate details shown next to a ranked match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub roles: Vec<String>,
    pub motivations: Vec<String>,
    pub top_motivation: String,
    pub availability: Availability,
    pub communication: Communication,
    pub persona: PersonaLabels,
}

impl From<&CanonicalProfile> for ProfileSummary {
    fn from(profile: &CanonicalProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.label().to_string(),
            roles: profile.roles.iter().cloned().collect(),
            motivations: profile.motivations.iter().cloned().collect(),
            top_motivation: profile.top_motivation.clone(),
            availability: profile.availability,
            communication: profile.communication,
            persona: PersonaLabels::derive(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traits_clamped_on_construction() {
        let traits = PersonalityTraits::new(0, 9, 3, 1, 6);
        assert_eq!(traits.openness, 1);
        assert_eq!(traits.conscientiousness, 6);
        assert_eq!(traits.extraversion, 3);
    }

    #[test]
    fn test_traits_deserialize_clamps_and_defaults() {
        let traits: PersonalityTraits =
            serde_json::from_str(r#"{"openness": 11, "conscientiousness": -4, "extraversion": 4.6}"#)
                .unwrap();
        assert_eq!(traits.openness, 6);
        assert_eq!(traits.conscientiousness, 1);
        assert_eq!(traits.extraversion, 5);
        assert_eq!(traits.agreeableness, 3);
        assert_eq!(traits.neuroticism, 3);
    }

    #[test]
    fn test_availability_codes_round_trip_through_serde() {
        for availability in Availability::ALL {
            let json = serde_json::to_string(&availability).unwrap();
            assert_eq!(json, format!("\"{}\"", availability.as_str()));
            let back: Availability = serde_json::from_str(&json).unwrap();
            assert_eq!(back, availability);
        }
    }

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(Communication::from_code(" Weekly_Sync "), Some(Communication::WeeklySync));
        assert_eq!(Flexibility::from_code("VERY_FLEXIBLE"), Some(Flexibility::VeryFlexible));
        assert_eq!(ConflictStyle::from_code("shouting"), None);
    }

    #[test]
    fn test_new_profile_uses_neutral_defaults() {
        let profile = CanonicalProfile::new("u1");
        assert_eq!(profile.conflict_style, ConflictStyle::Indirect);
        assert_eq!(profile.availability, Availability::Depends);
        assert_eq!(profile.availability_flexibility, Flexibility::SlightlyFlexible);
        assert_eq!(profile.chronotype, Chronotype::Flexible);
        assert_eq!(profile.communication, Communication::Depends);
        assert_eq!(profile.personality, PersonalityTraits::default());
        assert_eq!(profile.label(), "u1");
    }

    #[test]
    fn test_canonical_json_uses_camel_case() {
        let mut profile = CanonicalProfile::new("u1");
        profile.top_motivation = "impact".into();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["topMotivation"], "impact");
        assert_eq!(json["availabilityFlexibility"], "slightly_flexible");
        assert!(json.get("updatedAt").is_none());
    }
}
