use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::facts::schema::SchemaKey;

/// A fact exactly as the extraction oracle returned it. The key is still an
/// unchecked string; see [`crate::facts::reconcile::ingest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawFact {
    pub key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub context: Option<String>,
}

/// Top-level oracle response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OracleFacts {
    #[serde(default)]
    pub facts: Vec<RawFact>,
}

/// A schema-valid fact awaiting normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFact {
    pub key: SchemaKey,
    pub value: String,
    pub context: Option<String>,
}

impl CandidateFact {
    pub fn new(key: SchemaKey, value: impl Into<String>, context: Option<String>) -> Self {
        Self {
            key,
            value: value.into(),
            context,
        }
    }

    /// Placeholder for a key the oracle never mentioned.
    pub fn empty(key: SchemaKey) -> Self {
        Self {
            key,
            value: String::new(),
            context: Some(String::new()),
        }
    }
}

/// One output row. Column names match the spreadsheet header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedRow {
    #[serde(rename = "#")]
    pub index: usize,
    #[serde(rename = "Key")]
    pub key: SchemaKey,
    #[serde(rename = "Value", default)]
    pub value: String,
    #[serde(rename = "Comments", default)]
    pub comments: String,
}

/// Plain text of one input document, used only as a lookup corpus.
#[derive(Debug, Clone, Copy)]
pub struct SourceText<'a>(&'a str);

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Text from the first occurrence of `phrase` to the end of the document.
    pub fn from_phrase(&self, phrase: &str) -> Option<&'a str> {
        self.0.find(phrase).map(|start| &self.0[start..])
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Accepts strings, numbers, booleans and null; the oracle is not strict about types.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_to_string(other)),
    })
}
