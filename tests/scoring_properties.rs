//! Exhaustive checks of the scorer's invariants over the enumerated fields.

use sprout::CanonicalProfile;
use sprout::profile::{
    Availability, Communication, ConflictStyle, Flexibility, MOTIVATIONS, PersonalityTraits,
    ROLES,
};
use sprout::scoring::{Category, MAX_SCORE, score};

fn cohort() -> Vec<CanonicalProfile> {
    serde_json::from_str(include_str!("fixtures/cohort.json")).expect("fixture parses")
}

/// Every combination of the fields that drive the hard filters.
fn filter_grid() -> Vec<CanonicalProfile> {
    let mut out = Vec::new();
    for availability in Availability::ALL {
        for flexibility in Flexibility::ALL {
            for communication in Communication::ALL {
                for conflict in ConflictStyle::ALL {
                    let mut p = CanonicalProfile::new(format!(
                        "{availability}-{flexibility}-{communication}-{conflict}"
                    ));
                    p.availability = availability;
                    p.availability_flexibility = flexibility;
                    p.communication = communication;
                    p.conflict_style = conflict;
                    out.push(p);
                }
            }
        }
    }
    out
}

#[test]
fn score_is_symmetric_across_filter_grid() {
    let grid = filter_grid();
    for a in &grid {
        for b in &grid {
            let ab = score(a, b);
            let ba = score(b, a);
            assert_eq!(ab.disqualified, ba.disqualified, "{} / {}", a.id, b.id);
            assert_eq!(ab.score, ba.score, "{} / {}", a.id, b.id);
            assert_eq!(ab.category_scores, ba.category_scores, "{} / {}", a.id, b.id);
        }
    }
}

#[test]
fn totals_are_bounded_and_sum_categories() {
    let grid = filter_grid();
    for a in &grid {
        for b in &grid {
            let result = score(a, b);
            if result.disqualified {
                assert!(!result.reasons.is_empty());
                assert_eq!(result.score, 0);
                continue;
            }
            assert!(result.reasons.is_empty());
            assert!(result.score <= MAX_SCORE);
            assert_eq!(result.score, result.category_scores.total());
            for (category, points) in result.category_scores.iter() {
                assert!(points <= category.max(), "{category} = {points}");
            }
        }
    }
}

#[test]
fn symmetric_over_trait_extremes() {
    let levels = [1u8, 2, 3, 4, 6];
    let mut profiles = Vec::new();
    for &o in &levels {
        for &e in &levels {
            for &n in &levels {
                let mut p = CanonicalProfile::new(format!("o{o}e{e}n{n}"));
                p.personality = PersonalityTraits::new(o, 7 - o, e, n.min(4), n);
                profiles.push(p);
            }
        }
    }
    for a in &profiles {
        for b in &profiles {
            assert_eq!(
                score(a, b).category_scores.personality,
                score(b, a).category_scores.personality
            );
        }
    }
}

#[test]
fn motivation_and_roles_never_exceed_caps() {
    let mut everything = CanonicalProfile::new("all");
    everything.motivations = MOTIVATIONS.iter().map(|m| m.to_string()).collect();
    everything.roles = ROLES.iter().map(|r| r.to_string()).collect();
    everything.top_motivation = "impact".into();
    everything.preferred_role = "anything".into();

    let mut other = everything.clone();
    other.id = "all-2".into();
    other.preferred_role = "something else".into();

    let result = score(&everything, &other);
    assert_eq!(result.category_scores.get(Category::Motivation), 20);
    assert_eq!(result.category_scores.get(Category::Roles), 25);
}

#[test]
fn ten_twenty_against_nights_weekends_disqualifies() {
    let mut a = CanonicalProfile::new("a");
    a.availability = Availability::TenToTwenty;
    let mut b = CanonicalProfile::new("b");
    b.availability = Availability::NightsWeekends;

    let result = score(&a, &b);
    assert!(result.disqualified);
    assert!(result.reasons[0].contains("10_20"));
    assert!(result.reasons[0].contains("nights_weekends"));
}

#[test]
fn daily_checkin_against_async_disqualifies_on_communication() {
    let mut a = CanonicalProfile::new("a");
    a.availability = Availability::FullTime;
    a.communication = Communication::DailyCheckin;
    let mut b = CanonicalProfile::new("b");
    b.availability = Availability::TwentyToForty;
    b.communication = Communication::Async;

    let result = score(&a, &b);
    assert!(result.disqualified);
    assert!(result.reasons[0].starts_with("Communication style mismatch"));
}

#[test]
fn identical_profiles_differing_only_by_id() {
    let mut a = CanonicalProfile::new("twin-a");
    a.conflict_style = ConflictStyle::Direct;
    a.roles.insert("technical".into());
    a.motivations.insert("impact".into());
    a.top_motivation = "impact".into();
    let mut b = a.clone();
    b.id = "twin-b".into();

    let result = score(&a, &b);
    assert!(!result.disqualified);
    assert_eq!(result.category_scores.availability, 15);
    assert_eq!(result.category_scores.personality, 5);
    assert_eq!(result.category_scores.communication, 10);
    assert_eq!(result.category_scores.motivation, 10);
    assert_eq!(result.category_scores.roles, 0);
    assert_eq!(result.category_scores.conflict_style, 10);
    assert_eq!(result.score, 50);
}

#[test]
fn scorer_does_not_touch_inputs_and_is_deterministic() {
    let people = cohort();
    let snapshot = people.clone();
    for a in &people {
        for b in &people {
            assert_eq!(score(a, b), score(a, b));
        }
    }
    assert_eq!(people, snapshot);
}

#[test]
fn cohort_scores_are_symmetric() {
    let people = cohort();
    for a in &people {
        for b in &people {
            let (ab, ba) = (score(a, b), score(b, a));
            assert_eq!(ab.disqualified, ba.disqualified);
            assert_eq!(ab.category_scores, ba.category_scores);
        }
    }
}

#[test]
fn chronotype_does_not_affect_score() {
    let people = cohort();
    let (a, b) = (&people[1], &people[3]);
    let baseline = score(a, b);
    let mut shifted = a.clone();
    for chronotype in sprout::profile::Chronotype::ALL {
        shifted.chronotype = chronotype;
        assert_eq!(score(&shifted, b), baseline);
    }
}
