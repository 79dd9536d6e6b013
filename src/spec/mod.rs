//! Raw specification documents.
//!
//! A specification is an untyped tree of mappings, sequences and scalars,
//! as produced by a document parser. Mappings keep the order in which
//! their keys were written, so that cards are built in document order.
//!
//! ## Key Types
//!
//! - `Spec`: One node of a specification tree
//! - `SpecMap`: An ordered mapping from string keys to nodes
//! - `Format`: A registered document format, found by file extension

pub mod loader;

use indexmap::IndexMap;
use serde::Serialize;

pub use loader::{load_path, locate, parse_str, Format};

/// An ordered mapping of a specification.
pub type SpecMap = IndexMap<String, Spec>;

/// A node in a raw specification tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Spec {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Seq(Vec<Spec>),
    Map(SpecMap),
}

impl Spec {
    /// A short description of the node's shape, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Spec::Null => "nothing",
            Spec::Bool(_) => "a boolean",
            Spec::Int(_) => "an integer",
            Spec::Float(_) => "a number",
            Spec::Text(_) => "text",
            Spec::Seq(_) => "a sequence",
            Spec::Map(_) => "a mapping",
        }
    }

    /// Build a mapping from key/value pairs.
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Spec>,
        I: IntoIterator<Item = (K, V)>,
    {
        Spec::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Spec::Null)
    }

    /// True for booleans, numbers and text.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Spec::Bool(_) | Spec::Int(_) | Spec::Float(_) | Spec::Text(_))
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&SpecMap> {
        match self {
            Spec::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut SpecMap> {
        match self {
            Spec::Map(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Spec::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Spec::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The text form of a scalar. `None` for nothing and for containers.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Spec::Bool(b) => Some(b.to_string()),
            Spec::Int(i) => Some(i.to_string()),
            Spec::Float(f) => Some(float_text(*f)),
            Spec::Text(s) => Some(s.clone()),
            Spec::Null | Spec::Seq(_) | Spec::Map(_) => None,
        }
    }

    /// Treat the node as a list of elements.
    ///
    /// Nothing is an empty list and a bare scalar is a list of one.
    /// Mappings cannot be listed; their kind is returned as the error.
    pub fn into_items(self) -> Result<Vec<Spec>, &'static str> {
        match self {
            Spec::Null => Ok(Vec::new()),
            Spec::Seq(items) => Ok(items),
            Spec::Map(_) => Err("a mapping"),
            scalar => Ok(vec![scalar]),
        }
    }
}

fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

impl std::fmt::Display for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Spec::Null => Ok(()),
            Spec::Seq(_) | Spec::Map(_) => {
                let text = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
                f.write_str(&text)
            }
            scalar => f.write_str(&scalar.to_text().unwrap_or_default()),
        }
    }
}

impl From<&str> for Spec {
    fn from(v: &str) -> Self {
        Spec::Text(v.to_string())
    }
}

impl From<String> for Spec {
    fn from(v: String) -> Self {
        Spec::Text(v)
    }
}

impl From<i64> for Spec {
    fn from(v: i64) -> Self {
        Spec::Int(v)
    }
}

impl From<i32> for Spec {
    fn from(v: i32) -> Self {
        Spec::Int(v as i64)
    }
}

impl From<f64> for Spec {
    fn from(v: f64) -> Self {
        Spec::Float(v)
    }
}

impl From<bool> for Spec {
    fn from(v: bool) -> Self {
        Spec::Bool(v)
    }
}

impl From<Vec<Spec>> for Spec {
    fn from(v: Vec<Spec>) -> Self {
        Spec::Seq(v)
    }
}

impl From<SpecMap> for Spec {
    fn from(v: SpecMap) -> Self {
        Spec::Map(v)
    }
}

impl From<serde_json::Value> for Spec {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Spec::Null,
            Value::Bool(b) => Spec::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Spec::Int(i),
                None => Spec::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Spec::Text(s),
            Value::Array(items) => Spec::Seq(items.into_iter().map(Spec::from).collect()),
            Value::Object(map) => {
                Spec::Map(map.into_iter().map(|(k, v)| (k, Spec::from(v))).collect())
            }
        }
    }
}

impl From<serde_yaml::Value> for Spec {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Null => Spec::Null,
            Value::Bool(b) => Spec::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Spec::Int(i),
                None => Spec::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Spec::Text(s),
            Value::Sequence(items) => Spec::Seq(items.into_iter().map(Spec::from).collect()),
            Value::Mapping(map) => Spec::Map(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), Spec::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Spec::from(tagged.value),
        }
    }
}

// YAML allows non-string keys, such as `1: ...` for numbered cards.
fn yaml_key(key: serde_yaml::Value) -> String {
    match Spec::from(key) {
        Spec::Null => String::new(),
        other => other.to_string(),
    }
}
