//! Knowledge-base (SPARQL JSON) bindings → [`Deity`].

use crate::domains::parse_domains;
use crate::error::{Error, Result};
use crate::model::{Deity, Position};
use crate::mythology::Mythology;
use rand::Rng;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Radius of the ball unclustered deities are scattered in.
pub const RANDOM_POSITION_MAX_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BindingValue {
    pub value: String,
}

/// One row of a SPARQL JSON result. Unknown variables are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeRecord {
    pub deity: Option<BindingValue>,
    pub deity_label: Option<BindingValue>,
    pub item: Option<BindingValue>,
    pub item_label: Option<BindingValue>,
    pub instance: Option<BindingValue>,
    pub description: Option<BindingValue>,
    pub image: Option<BindingValue>,
    pub domains: Option<BindingValue>,
    pub fathers: Option<BindingValue>,
    pub mothers: Option<BindingValue>,
    pub children: Option<BindingValue>,
    pub article: Option<BindingValue>,
}

fn value_of(binding: &Option<BindingValue>) -> Option<&str> {
    binding
        .as_ref()
        .map(|b| b.value.as_str())
        .filter(|v| !v.is_empty())
}

fn owned(binding: &Option<BindingValue>) -> Option<String> {
    value_of(binding).map(str::to_string)
}

fn uri_slug(uri: &str) -> Option<&str> {
    uri.rsplit('/').next().filter(|s| !s.is_empty())
}

impl KnowledgeRecord {
    /// Label fields first, then the last path segment of the entity URI, then `"Unknown"`.
    pub fn display_name(&self) -> String {
        value_of(&self.deity_label)
            .or_else(|| value_of(&self.item_label))
            .or_else(|| value_of(&self.deity).and_then(uri_slug))
            .or_else(|| value_of(&self.item).and_then(uri_slug))
            .unwrap_or("Unknown")
            .to_string()
    }

    /// Mythology named by the `instance` field, or `fallback` when absent or unrecognized.
    pub fn mythology_or(&self, fallback: &str) -> String {
        value_of(&self.instance)
            .and_then(Mythology::from_instance)
            .map(|m| m.name().to_string())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn domain_list(&self) -> Vec<String> {
        parse_domains(value_of(&self.domains))
    }
}

/// Builds a deity at a caller-chosen position.
pub fn convert_record_at(
    record: &KnowledgeRecord,
    mythology_fallback: &str,
    id: u32,
    position: Position,
) -> Deity {
    Deity {
        id,
        name: record.display_name(),
        mythology: record.mythology_or(mythology_fallback),
        position,
        relations: Vec::new(),
        domains: owned(&record.domains),
        domain_cluster: None,
        description: owned(&record.description),
        image: owned(&record.image),
        fathers: owned(&record.fathers),
        mothers: owned(&record.mothers),
        children: owned(&record.children),
        article: owned(&record.article),
    }
}

/// Builds a deity at a random position, for use outside the cluster layout.
pub fn convert_record<R: Rng + ?Sized>(
    record: &KnowledgeRecord,
    mythology_fallback: &str,
    id: u32,
    rng: &mut R,
) -> Deity {
    let position = Position::random(0.0, RANDOM_POSITION_MAX_RADIUS, rng);
    convert_record_at(record, mythology_fallback, id, position)
}

/// Extracts result rows from a SPARQL JSON response.
///
/// Accepts the standard `{"results": {"bindings": [...]}}` envelope or a bare array of rows.
pub fn parse_bindings(json: &str) -> Result<Vec<KnowledgeRecord>> {
    let value: Value = serde_json::from_str(json)?;
    bindings_from_value(value)
}

/// Deserializes the rows of an already parsed response into `T`.
pub fn bindings_from_value<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    let rows = match value {
        Value::Array(rows) => Value::Array(rows),
        Value::Object(mut obj) => match obj
            .remove("results")
            .and_then(|mut r| r.get_mut("bindings").map(Value::take))
        {
            Some(rows @ Value::Array(_)) => rows,
            _ => {
                return Err(Error::UnsupportedResponse {
                    message: "expected `results.bindings` to be an array".to_string(),
                });
            }
        },
        other => {
            return Err(Error::UnsupportedResponse {
                message: format!("expected an object or array, got {other}"),
            });
        }
    };
    Ok(serde_json::from_value(rows)?)
}
