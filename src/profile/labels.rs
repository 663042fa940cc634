//! Survey answer labels and the canonical codes they map to.
//!
//! Labels are matched exactly as the onboarding survey renders them. Anything
//! that is not a known label is retried as a canonical code, case-insensitively.

use super::{Availability, Chronotype, Communication, ConflictStyle, Flexibility, MOTIVATIONS, ROLES};

pub(crate) const CONFLICT_LABELS: &[(&str, ConflictStyle)] = &[
    (
        "I prefer to address it directly and resolve it quickly.",
        ConflictStyle::Direct,
    ),
    (
        "I bring it up gently, usually after thinking it through.",
        ConflictStyle::Indirect,
    ),
    (
        "I try to avoid confrontation and hope it resolves.",
        ConflictStyle::Avoidant,
    ),
    (
        "I usually internalize it unless it becomes urgent.",
        ConflictStyle::Internalize,
    ),
];

pub(crate) const AVAILABILITY_LABELS: &[(&str, Availability)] = &[
    ("Nights/weekends only", Availability::NightsWeekends),
    ("10\u{2013}20 hrs/week", Availability::TenToTwenty),
    ("20\u{2013}40 hrs/week", Availability::TwentyToForty),
    ("Full-time", Availability::FullTime),
    ("Depends on the match", Availability::Depends),
];

pub(crate) const FLEXIBILITY_LABELS: &[(&str, Flexibility)] = &[
    ("Very rigid", Flexibility::Rigid),
    ("Slightly flexible", Flexibility::SlightlyFlexible),
    ("Very flexible", Flexibility::VeryFlexible),
];

pub(crate) const CHRONOTYPE_LABELS: &[(&str, Chronotype)] = &[
    ("Early morning (5am\u{2013}10am)", Chronotype::Morning),
    ("Midday (11am\u{2013}4pm)", Chronotype::Midday),
    ("Evening/Night (5pm\u{2013}2am)", Chronotype::Night),
    ("Flexible throughout the day", Chronotype::Flexible),
];

pub(crate) const COMMUNICATION_LABELS: &[(&str, Communication)] = &[
    ("Async-first", Communication::Async),
    ("Weekly syncs/check-ins", Communication::WeeklySync),
    (
        "Daily check-ins and active messaging",
        Communication::DailyCheckin,
    ),
    ("Depends on the team", Communication::Depends),
];

const MOTIVATION_LABELS: &[(&str, &str)] = &[
    ("Freedom", "freedom"),
    ("Impact", "impact"),
    ("Wealth", "wealth"),
    ("Learning Fast", "learning"),
    ("Collaboration", "collaboration"),
];

const ROLE_LABELS: &[(&str, &str)] = &[
    ("Visionary", "visionary"),
    ("Operator", "operator"),
    ("Technical", "technical"),
    ("Designer/UX", "designer"),
    ("Marketer", "marketer"),
    ("Sales", "sales"),
    ("Generalist", "generalist"),
];

/// Resolve a single-choice answer against a label table, then as a code.
pub(crate) fn resolve<T: Copy>(
    table: &[(&str, T)],
    raw: &str,
    from_code: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let trimmed = raw.trim();
    table
        .iter()
        .find(|(label, _)| *label == trimmed)
        .map(|(_, value)| *value)
        .or_else(|| from_code(trimmed))
}

/// Map a motivation label or code to its canonical code.
pub fn motivation_code(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if let Some((_, code)) = MOTIVATION_LABELS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(trimmed))
    {
        return Some(*code);
    }
    MOTIVATIONS
        .into_iter()
        .find(|code| code.eq_ignore_ascii_case(trimmed))
}

/// Map a role label or code to its canonical code.
pub fn role_code(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if let Some((_, code)) = ROLE_LABELS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(trimmed))
    {
        return Some(*code);
    }
    ROLES.into_iter().find(|code| code.eq_ignore_ascii_case(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_exact_label() {
        assert_eq!(
            resolve(AVAILABILITY_LABELS, "20\u{2013}40 hrs/week", Availability::from_code),
            Some(Availability::TwentyToForty)
        );
        assert_eq!(
            resolve(AVAILABILITY_LABELS, "full_time", Availability::from_code),
            Some(Availability::FullTime)
        );
    }

    #[test]
    fn test_resolve_rejects_hyphen_variant_of_en_dash_label() {
        assert_eq!(
            resolve(AVAILABILITY_LABELS, "20-40 hrs/week", Availability::from_code),
            None
        );
    }

    #[test]
    fn test_motivation_and_role_codes() {
        assert_eq!(motivation_code("Learning Fast"), Some("learning"));
        assert_eq!(motivation_code("IMPACT"), Some("impact"));
        assert_eq!(motivation_code("Fame"), None);
        assert_eq!(role_code("Designer/UX"), Some("designer"));
        assert_eq!(role_code("finance"), Some("finance"));
        assert_eq!(role_code("Wizard"), None);
    }
}
