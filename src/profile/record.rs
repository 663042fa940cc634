//! The shape profiles are stored in.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use super::normalize::parse_timestamp;
use super::{CanonicalProfile, PersonaLabels};

/// A stored profile record as the profile store hands it out.
///
/// Only `id` is required. Every other stored field is kept verbatim in
/// `fields`: survey labels, canonical codes or legacy shapes alike. The
/// normalizer makes sense of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProfileRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RawProfileRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            created_at: None,
            updated_at: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Build the stored form of a normalized profile.
    ///
    /// Canonical codes go under their snake_case storage keys. The persona
    /// labels are written alongside under the legacy display keys. `name` and
    /// `email` are left for the caller.
    pub fn from_profile(profile: &CanonicalProfile) -> Self {
        let persona = PersonaLabels::derive(profile);
        let traits = profile.personality;
        let mut record = Self::new(profile.id.clone())
            .with_field("openness", traits.openness)
            .with_field("conscientiousness", traits.conscientiousness)
            .with_field("extraversion", traits.extraversion)
            .with_field("agreeableness", traits.agreeableness)
            .with_field("neuroticism", traits.neuroticism)
            .with_field("conflict_style", profile.conflict_style.as_str())
            .with_field("availability", profile.availability.as_str())
            .with_field(
                "availability_flexibility",
                profile.availability_flexibility.as_str(),
            )
            .with_field("chronotype", profile.chronotype.as_str())
            .with_field("communication", profile.communication.as_str())
            .with_field("motivations", json!(profile.motivations))
            .with_field("top_motivation", profile.top_motivation.as_str())
            .with_field("roles", json!(profile.roles))
            .with_field("preferred_role", profile.preferred_role.as_str())
            .with_field("team_style", profile.team_style.as_str())
            .with_field(
                "cofounder_frustration",
                profile.cofounder_frustration.as_str(),
            )
            .with_field("personality", persona.personality)
            .with_field("work_style", persona.work_style)
            .with_field("cofounder_preference", persona.cofounder_preference);
        record.updated_at = profile.updated_at;
        record
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}
