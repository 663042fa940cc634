//! The six category scorers. Each is symmetric in its arguments.

use crate::profile::{CanonicalProfile, ConflictStyle};

use super::filters::{
    COMPATIBLE_AVAILABILITY, COMPATIBLE_COMMUNICATION, availability_aligned,
    communication_aligned,
};
use super::unordered_pair_in;

/// Role pairs that cover each other's gaps.
const COMPLEMENTARY_ROLES: [(&str, &str); 7] = [
    ("technical", "business"),
    ("technical", "marketing"),
    ("technical", "sales"),
    ("visionary", "operator"),
    ("designer", "technical"),
    ("marketer", "technical"),
    ("sales", "technical"),
];

const COMPATIBLE_CONFLICT: [(ConflictStyle, ConflictStyle); 2] = [
    (ConflictStyle::Direct, ConflictStyle::Indirect),
    (ConflictStyle::Avoidant, ConflictStyle::Internalize),
];

const MOTIVATION_CAP: u32 = 20;
const ROLES_CAP: u32 = 25;

pub(super) fn availability(a: &CanonicalProfile, b: &CanonicalProfile) -> u32 {
    if availability_aligned(a, b) {
        15
    } else if unordered_pair_in(&COMPATIBLE_AVAILABILITY, &a.availability, &b.availability) {
        10
    } else {
        0
    }
}

pub(super) fn personality(a: &CanonicalProfile, b: &CanonicalProfile) -> u32 {
    let (pa, pb) = (&a.personality, &b.personality);
    let moderate = |v: u8| (3..=4).contains(&v);
    let mut points = 0;

    // Openness balanced by conscientiousness
    if (pa.openness >= 4 && pb.conscientiousness >= 3)
        || (pb.openness >= 4 && pa.conscientiousness >= 3)
    {
        points += 5;
    }
    // Extravert with introvert
    if (pa.extraversion >= 4 && pb.extraversion <= 2)
        || (pb.extraversion >= 4 && pa.extraversion <= 2)
    {
        points += 5;
    }
    if moderate(pa.agreeableness) && moderate(pb.agreeableness) {
        points += 5;
    }
    // Calm partner steadies a moderately anxious one
    if (pa.neuroticism <= 2 && moderate(pb.neuroticism))
        || (pb.neuroticism <= 2 && moderate(pa.neuroticism))
    {
        points += 5;
    }
    points
}

pub(super) fn communication(a: &CanonicalProfile, b: &CanonicalProfile) -> u32 {
    if communication_aligned(a, b) {
        10
    } else if unordered_pair_in(&COMPATIBLE_COMMUNICATION, &a.communication, &b.communication) {
        5
    } else {
        0
    }
}

pub(super) fn motivation(a: &CanonicalProfile, b: &CanonicalProfile) -> u32 {
    let shared = a.motivations.intersection(&b.motivations).count() as u32;
    let mut points = shared.saturating_mul(5);
    if a.top_motivation == b.top_motivation {
        points += 5;
    }
    points.min(MOTIVATION_CAP)
}

pub(super) fn roles(a: &CanonicalProfile, b: &CanonicalProfile) -> u32 {
    let mut points = 0;
    let complementary = COMPLEMENTARY_ROLES
        .iter()
        .any(|(x, y)| (a.has_role(x) && b.has_role(y)) || (b.has_role(x) && a.has_role(y)));
    if complementary {
        points += 10;
    }
    if a.preferred_role != b.preferred_role {
        points += 10;
    }
    if a.has_role("generalist") || b.has_role("generalist") {
        points += 5;
    }
    points.min(ROLES_CAP)
}

pub(super) fn conflict_style(a: &CanonicalProfile, b: &CanonicalProfile) -> u32 {
    if a.conflict_style == b.conflict_style
        || unordered_pair_in(&COMPATIBLE_CONFLICT, &a.conflict_style, &b.conflict_style)
    {
        10
    } else {
        5
    }
}
