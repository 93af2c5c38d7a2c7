//! Submission pack schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use listlaunch_db::models::SubmissionPack;
use listlaunch_db::queries::packs::PackFields;

use crate::error::{PlannerError, Result};

/// Pack content as exchanged with callers and the generator.
///
/// Only `title` is required and the document must be an object. Unknown keys
/// are ignored. Optional fields may be omitted but not set to `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackDraft {
    pub title: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub utm_url: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub extra_fields: Option<BTreeMap<String, String>>,
}

impl PackDraft {
    /// Validate an arbitrary JSON value against the pack schema.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PlannerError::SchemaViolation(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| PlannerError::SchemaViolation(e.to_string()))
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| PlannerError::SchemaViolation(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn into_fields(self) -> PackFields {
        PackFields {
            title: self.title,
            tagline: self.tagline,
            short_description: self.short_description,
            long_description: self.long_description,
            categories: self.categories.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            utm_url: self.utm_url,
            cta: self.cta,
            extra_fields: self.extra_fields.unwrap_or_default(),
        }
    }
}

/// Deserialize an optional field that, when given, must hold a value.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<SubmissionPack> for PackDraft {
    fn from(pack: SubmissionPack) -> Self {
        Self {
            title: pack.title,
            tagline: pack.tagline,
            short_description: pack.short_description,
            long_description: pack.long_description,
            categories: Some(pack.categories),
            tags: Some(pack.tags),
            utm_url: pack.utm_url,
            cta: pack.cta,
            extra_fields: Some(pack.extra_fields),
        }
    }
}
