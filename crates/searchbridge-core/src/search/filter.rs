//! Metadata filter predicate types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat metadata filter over the fixed field set.
///
/// The typed allow-list guarantees the serialized filter never carries keys
/// outside the four permitted fields, whatever the upstream model produced.
/// Absent fields are omitted, so the empty predicate serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_month: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl FilterPredicate {
    /// Build a predicate from a JSON object, keeping only the permitted
    /// fields. Wrong-typed values for known fields are dropped; within a
    /// `tags` array, non-string elements are dropped individually.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            author: object
                .get("author")
                .and_then(Value::as_str)
                .map(str::to_string),
            published_year: object.get("published_year").and_then(Value::as_i64),
            published_month: object.get("published_month").and_then(Value::as_i64),
            tags: object.get("tags").and_then(Value::as_array).map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
        }
    }

    /// True when no field carries a constraint
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.published_year.is_none()
            && self.published_month.is_none()
            && self.tags.is_none()
    }
}
