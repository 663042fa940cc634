//! Human-readable tiers and category descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Category;

/// Overall tier of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchQuality {
    Poor,
    Fair,
    Good,
    Excellent,
    Exceptional,
}

impl MatchQuality {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Exceptional,
            80..=89 => Self::Excellent,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
            Self::Exceptional => "Exceptional",
        }
    }
}

impl fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const AVAILABILITY_DESCRIPTIONS: &[(u32, &str)] = &[
    (0, "Availability conflict"),
    (10, "Compatible schedules"),
    (15, "Perfect availability match"),
];

const PERSONALITY_DESCRIPTIONS: &[(u32, &str)] = &[
    (0, "Personality mismatch"),
    (5, "Some personality alignment"),
    (10, "Good personality fit"),
    (15, "Strong personality balance"),
    (20, "Perfect psychological complementarity"),
];

const COMMUNICATION_DESCRIPTIONS: &[(u32, &str)] = &[
    (0, "Communication style mismatch"),
    (5, "Compatible communication preferences"),
    (10, "Communication styles align perfectly"),
];

const MOTIVATION_DESCRIPTIONS: &[(u32, &str)] = &[
    (0, "Different motivations"),
    (5, "Limited motivation overlap"),
    (10, "Some shared motivations"),
    (15, "Good motivation alignment"),
    (20, "Shared core motivations"),
];

const ROLES_DESCRIPTIONS: &[(u32, &str)] = &[
    (0, "Role conflict"),
    (5, "Limited role fit"),
    (10, "Some role complementarity"),
    (15, "Good role alignment"),
    (20, "Strong role fit"),
    (25, "Perfect role complementarity"),
];

const CONFLICT_DESCRIPTIONS: &[(u32, &str)] = &[
    (0, "Conflict style mismatch"),
    (5, "Moderate conflict compatibility"),
    (10, "Compatible conflict resolution"),
];

impl Category {
    /// Sentence for the table entry closest to `score`; ties go to the lower key.
    pub fn describe(&self, score: u32) -> &'static str {
        let table = match self {
            Self::Availability => AVAILABILITY_DESCRIPTIONS,
            Self::Personality => PERSONALITY_DESCRIPTIONS,
            Self::Communication => COMMUNICATION_DESCRIPTIONS,
            Self::Motivation => MOTIVATION_DESCRIPTIONS,
            Self::Roles => ROLES_DESCRIPTIONS,
            Self::ConflictStyle => CONFLICT_DESCRIPTIONS,
        };
        table
            .iter()
            .min_by_key(|(key, _)| key.abs_diff(score))
            .map(|(_, text)| *text)
            .unwrap_or("")
    }
}
