//! Hard filters. A failing filter disqualifies the pair outright.

use crate::profile::{Availability, CanonicalProfile, Communication, Flexibility};

use super::unordered_pair_in;

/// Availability pairs that can work together despite differing.
pub(super) const COMPATIBLE_AVAILABILITY: [(Availability, Availability); 5] = [
    (Availability::TenToTwenty, Availability::TwentyToForty),
    (Availability::TwentyToForty, Availability::FullTime),
    (Availability::TenToTwenty, Availability::FullTime),
    (Availability::NightsWeekends, Availability::TwentyToForty),
    (Availability::NightsWeekends, Availability::FullTime),
];

pub(super) const COMPATIBLE_COMMUNICATION: [(Communication, Communication); 1] =
    [(Communication::Async, Communication::WeeklySync)];

/// Both very flexible, either open, or the same commitment.
pub(super) fn availability_aligned(a: &CanonicalProfile, b: &CanonicalProfile) -> bool {
    (a.availability_flexibility == Flexibility::VeryFlexible
        && b.availability_flexibility == Flexibility::VeryFlexible)
        || a.availability == Availability::Depends
        || b.availability == Availability::Depends
        || a.availability == b.availability
}

pub(super) fn communication_aligned(a: &CanonicalProfile, b: &CanonicalProfile) -> bool {
    a.communication == Communication::Depends
        || b.communication == Communication::Depends
        || a.communication == b.communication
}

/// Reason the pair's availability rules it out, if it does.
pub(super) fn availability_mismatch(a: &CanonicalProfile, b: &CanonicalProfile) -> Option<String> {
    if availability_aligned(a, b)
        || unordered_pair_in(&COMPATIBLE_AVAILABILITY, &a.availability, &b.availability)
    {
        return None;
    }
    Some(format!(
        "Availability mismatch: {} vs {} - incompatible availability preferences",
        a.availability, b.availability
    ))
}

/// Reason the pair's communication styles rule it out, if they do.
pub(super) fn communication_mismatch(
    a: &CanonicalProfile,
    b: &CanonicalProfile,
) -> Option<String> {
    if communication_aligned(a, b)
        || unordered_pair_in(&COMPATIBLE_COMMUNICATION, &a.communication, &b.communication)
    {
        return None;
    }
    Some("Communication style mismatch: incompatible communication preferences".to_string())
}
