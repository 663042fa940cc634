//! Survey answers and stored records to [`CanonicalProfile`].
//!
//! Normalization is total. Each field is looked up under its survey key, its
//! snake_case storage key and, where one existed, its legacy key. Values may be
//! survey labels, canonical codes, numbers or numeric strings, arrays or
//! comma-separated strings. Anything unusable falls back to the field default.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::labels::{
    AVAILABILITY_LABELS, CHRONOTYPE_LABELS, COMMUNICATION_LABELS, CONFLICT_LABELS,
    FLEXIBILITY_LABELS, motivation_code, resolve, role_code,
};
use super::record::RawProfileRecord;
use super::{
    Availability, CanonicalProfile, Chronotype, Communication, ConflictStyle, Flexibility,
    PersonalityTraits, trait_from_f64,
};

const TRAIT_KEYS: [&str; 5] = [
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
];

const CONFLICT_KEYS: &[&str] = &["conflictStyle", "conflict_style"];
const AVAILABILITY_KEYS: &[&str] = &["availability"];
const FLEXIBILITY_KEYS: &[&str] = &["availabilityFlexibility", "availability_flexibility"];
const CHRONOTYPE_KEYS: &[&str] = &["chronotype"];
const COMMUNICATION_KEYS: &[&str] = &["communication"];
const MOTIVATIONS_KEYS: &[&str] = &["motivations"];
const TOP_MOTIVATION_KEYS: &[&str] = &["topMotivation", "top_motivation", "motivation"];
const ROLES_KEYS: &[&str] = &["roles"];
const LEGACY_ROLE_KEYS: &[&str] = &["role"];
const PREFERRED_ROLE_KEYS: &[&str] = &["preferredRole", "preferred_role"];
const TEAM_STYLE_KEYS: &[&str] = &["teamStyle", "team_style"];
const FRUSTRATION_KEYS: &[&str] = &["cofounderFrustration", "cofounder_frustration"];

/// Placeholder written by older clients for an unanswered question.
const NOT_SPECIFIED: &str = "Not specified";

/// Raw onboarding answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers(BTreeMap<String, Value>);

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

impl From<BTreeMap<String, Value>> for RawAnswers {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<serde_json::Map<String, Value>> for RawAnswers {
    fn from(fields: serde_json::Map<String, Value>) -> Self {
        Self(fields.into_iter().collect())
    }
}

/// Normalize onboarding answers for the profile `id`.
///
/// A `name` or `email` answer is used for the display name.
pub fn normalize(id: &str, answers: &RawAnswers) -> CanonicalProfile {
    let fields = answers.fields();
    let name = first_value(fields, &["name"]).and_then(as_text);
    let email = first_value(fields, &["email"]).and_then(as_text);
    let mut profile = normalize_fields(id, fields);
    profile.display_name = display_name(name.as_deref(), email.as_deref());
    profile
}

/// Normalize a stored record, reconciling legacy field shapes.
pub fn normalize_record(record: &RawProfileRecord) -> CanonicalProfile {
    let mut profile = normalize_fields(&record.id, &record.fields);
    profile.display_name = display_name(record.name.as_deref(), record.email.as_deref());
    profile.updated_at = record.updated_at;
    profile
}

fn normalize_fields(id: &str, fields: &BTreeMap<String, Value>) -> CanonicalProfile {
    let mut profile = CanonicalProfile::new(id);

    profile.personality = personality(fields);

    profile.conflict_style = single_choice(
        fields,
        CONFLICT_KEYS,
        CONFLICT_LABELS,
        ConflictStyle::from_code,
    );
    profile.availability = single_choice(
        fields,
        AVAILABILITY_KEYS,
        AVAILABILITY_LABELS,
        Availability::from_code,
    );
    profile.availability_flexibility = single_choice(
        fields,
        FLEXIBILITY_KEYS,
        FLEXIBILITY_LABELS,
        Flexibility::from_code,
    );
    profile.chronotype = single_choice(
        fields,
        CHRONOTYPE_KEYS,
        CHRONOTYPE_LABELS,
        Chronotype::from_code,
    );
    profile.communication = single_choice(
        fields,
        COMMUNICATION_KEYS,
        COMMUNICATION_LABELS,
        Communication::from_code,
    );

    profile.motivations = code_set(fields, MOTIVATIONS_KEYS, motivation_code);
    profile.top_motivation = first_value(fields, TOP_MOTIVATION_KEYS)
        .and_then(as_text)
        .filter(|text| text != NOT_SPECIFIED)
        .map(|text| match motivation_code(&text) {
            Some(code) => code.to_string(),
            None => text.to_lowercase(),
        })
        .unwrap_or_default();

    profile.roles = code_set(fields, ROLES_KEYS, role_code);
    if profile.roles.is_empty() {
        profile.roles = code_set(fields, LEGACY_ROLE_KEYS, role_code);
    }
    profile.preferred_role = free_text(fields, PREFERRED_ROLE_KEYS);
    profile.team_style = free_text(fields, TEAM_STYLE_KEYS);
    profile.cofounder_frustration = free_text(fields, FRUSTRATION_KEYS);

    profile
}

/// Display name from a stored name, else the email local part.
pub(crate) fn display_name(name: Option<&str>, email: Option<&str>) -> String {
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if let Some(local) = email
        .and_then(|e| e.split('@').next())
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        return local.to_string();
    }
    "Anonymous".to_string()
}

// ---------------------------------------------------------------------------
// Field readers
// ---------------------------------------------------------------------------

fn first_value<'a>(fields: &'a BTreeMap<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

fn personality(fields: &BTreeMap<String, Value>) -> PersonalityTraits {
    // Canonical JSON nests the traits; survey answers keep them top-level.
    let nested = fields.get("personality").and_then(Value::as_object);
    let read = |key: &str| -> u8 {
        fields
            .get(key)
            .or_else(|| nested.and_then(|obj| obj.get(key)))
            .and_then(trait_from_value)
            .unwrap_or(PersonalityTraits::NEUTRAL)
    };
    let [o, c, e, a, n] = TRAIT_KEYS.map(read);
    PersonalityTraits::new(o, c, e, a, n)
}

/// Numeric trait answer, or `None` when it should count as unanswered.
pub(crate) fn trait_from_value(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_f64().and_then(trait_from_f64),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(trait_from_f64),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items.iter().find_map(Value::as_str)?.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn single_choice<T: Copy + Default + std::fmt::Debug>(
    fields: &BTreeMap<String, Value>,
    keys: &[&str],
    table: &[(&str, T)],
    from_code: impl Fn(&str) -> Option<T>,
) -> T {
    let Some(raw) = first_value(fields, keys).and_then(as_text) else {
        return T::default();
    };
    match resolve(table, &raw, from_code) {
        Some(value) => value,
        None => {
            let fallback = T::default();
            tracing::warn!(field = keys[0], label = %raw, ?fallback, "Unknown survey answer");
            fallback
        }
    }
}

fn list_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(as_text)
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn code_set(
    fields: &BTreeMap<String, Value>,
    keys: &[&str],
    to_code: fn(&str) -> Option<&'static str>,
) -> BTreeSet<String> {
    let Some(value) = first_value(fields, keys) else {
        return BTreeSet::new();
    };
    list_items(value)
        .into_iter()
        .filter(|item| item != NOT_SPECIFIED)
        .filter_map(|item| match to_code(&item) {
            Some(code) => Some(code.to_string()),
            None => {
                tracing::debug!(field = keys[0], label = %item, "Dropping unknown label");
                None
            }
        })
        .collect()
}

fn free_text(fields: &BTreeMap<String, Value>, keys: &[&str]) -> String {
    first_value(fields, keys)
        .and_then(as_text)
        .unwrap_or_default()
}

/// Parse a timestamp leniently; malformed values count as missing.
pub(crate) fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
