//! # Employee Metadata
//!
//! Open-ended per-employee metadata stored as JSON text.
//!
//! ## Value Model
//!
//! Values are a closed set of variants ([`MetaValue`]) rather than arbitrary
//! JSON, so the stored text always decodes back into the same shape:
//!
//! ```json
//! {
//!   "project": "Project-1",
//!   "level": "Senior",
//!   "batch": 1
//! }
//! ```
//!
//! Keys are kept in a `BTreeMap`, so key order never affects equality and the
//! console rendering is stable across runs.

use crate::error::{EmployeeBatchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single metadata value.
///
/// Serialized untagged: stored JSON is plain `true`, `1`, `1.5`, `"text"` or
/// a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(Metadata),
}

/// Metadata mapping attached to one employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }

    /// Key path of the first NaN or infinite float, nested maps included.
    fn non_finite_path(&self) -> Option<String> {
        self.0.iter().find_map(|(key, value)| match value {
            MetaValue::Float(v) if !v.is_finite() => Some(key.clone()),
            MetaValue::Map(inner) => inner.non_finite_path().map(|path| format!("{key}.{path}")),
            _ => None,
        })
    }
}

impl FromIterator<(String, MetaValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, MetaValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Metadata> for MetaValue {
    fn from(value: Metadata) -> Self {
        Self::Map(value)
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Bool(v) => write!(f, "{v}"),
            MetaValue::Int(v) => write!(f, "{v}"),
            MetaValue::Float(v) => write!(f, "{v}"),
            MetaValue::String(v) => write!(f, "{v}"),
            MetaValue::Map(v) => write!(f, "{v}"),
        }
    }
}

/// Renders as `map[batch:1 level:Senior project:Project-1]`.
impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map[")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{key}:{value}")?;
        }
        write!(f, "]")
    }
}

// JSON has no NaN or infinity; serde_json would write them as `null`.
fn ensure_finite(meta: &Metadata) -> Result<()> {
    match meta.non_finite_path() {
        Some(path) => Err(EmployeeBatchError::Codec(format!(
            "non-finite float at `{path}` cannot be encoded"
        ))),
        None => Ok(()),
    }
}

/// Encode one mapping as JSON text for the `employee_meta` column.
pub fn encode_metadata(meta: &Metadata) -> Result<String> {
    ensure_finite(meta)?;
    Ok(serde_json::to_string(meta)?)
}

/// Decode the `employee_meta` column. Malformed text is a codec error.
pub fn decode_metadata(text: &str) -> Result<Metadata> {
    Ok(serde_json::from_str(text)?)
}

/// Encode a batch's member mappings as one JSON array.
pub fn encode_metadata_list(members: &[Metadata]) -> Result<String> {
    members.iter().try_for_each(ensure_finite)?;
    Ok(serde_json::to_string(members)?)
}

pub fn decode_metadata_list(text: &str) -> Result<Vec<Metadata>> {
    Ok(serde_json::from_str(text)?)
}
