//! Schema definitions.
//!
//! A [`Schema`] names every parameter a configuration file may contain and
//! the [`ValueType`] its raw text is converted with. Schemas are either built
//! in code or deserialized from a TOML schema file (see [`SchemaFile`]).

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::value::{self, ConversionError, Value};

/// Target type of a configuration parameter.
///
/// Each variant behaves like a single-argument constructor applied to the
/// stripped raw text of the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Signed 64-bit integer.
    #[serde(alias = "integer")]
    Int,
    /// 64-bit float.
    Float,
    /// Truthiness of the text: empty is `false`, anything else is `true`.
    ///
    /// Note that the literal text `false` is non-empty and therefore
    /// converts to `true`.
    #[serde(alias = "boolean")]
    Bool,
    /// The text itself.
    #[serde(alias = "string")]
    Str,
}

impl ValueType {
    /// Convert raw text into a value of this type.
    pub fn convert(self, raw: &str) -> Result<Value, ConversionError> {
        match self {
            ValueType::Int => value::parse_int(raw).map(Value::Int),
            ValueType::Float => value::parse_float(raw).map(Value::Float),
            ValueType::Bool => Ok(Value::Bool(!raw.is_empty())),
            ValueType::Str => Ok(Value::Str(raw.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Str => "str",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping of known parameter names to their target types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Schema {
    types: IndexMap<String, ValueType>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.types.insert(name.into(), ty);
        self
    }

    /// Type registered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<ValueType> {
        self.types.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueType)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), *ty))
    }
}

impl<K: Into<String>> FromIterator<(K, ValueType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, ValueType)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(|(k, ty)| (k.into(), ty)).collect(),
        }
    }
}

/// Names flagged as optional.
///
/// The set is recorded alongside the schema but is not consulted while
/// reading: absent parameters are never reported and optional names get no
/// special treatment during the unknown-parameter check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionalSet(BTreeSet<String>);

impl OptionalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for OptionalSet {
    fn from(name: &str) -> Self {
        Self(BTreeSet::from([name.to_string()]))
    }
}

impl From<String> for OptionalSet {
    fn from(name: String) -> Self {
        Self(BTreeSet::from([name]))
    }
}

impl From<Vec<String>> for OptionalSet {
    fn from(names: Vec<String>) -> Self {
        Self(names.into_iter().collect())
    }
}

impl From<Vec<&str>> for OptionalSet {
    fn from(names: Vec<&str>) -> Self {
        names.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for OptionalSet {
    fn from(names: [&str; N]) -> Self {
        names.into_iter().collect()
    }
}

impl<T: Into<OptionalSet>> From<Option<T>> for OptionalSet {
    fn from(names: Option<T>) -> Self {
        names.map(Into::into).unwrap_or_default()
    }
}

impl<'a> FromIterator<&'a str> for OptionalSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl FromIterator<String> for OptionalSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `optional` in a schema file: a single name or a list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OptionalNames {
    One(String),
    Many(Vec<String>),
}

impl From<OptionalNames> for OptionalSet {
    fn from(names: OptionalNames) -> Self {
        match names {
            OptionalNames::One(name) => name.into(),
            OptionalNames::Many(names) => names.into(),
        }
    }
}

/// On-disk schema description.
///
/// ```toml
/// optional = ["name"]
///
/// [parameters]
/// count = "int"
/// name = "str"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Parameter name to type name.
    #[serde(default)]
    pub parameters: Schema,

    #[serde(default)]
    optional: Option<OptionalNames>,
}

impl SchemaFile {
    /// Names listed under `optional`.
    pub fn optional(&self) -> OptionalSet {
        self.optional.clone().into()
    }
}

/// Error type for schema file loading.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load a schema description from a TOML file.
///
/// Semantic oddities found by [`validate_schema`](crate::config::validation::validate_schema)
/// are logged as warnings and do not fail the load.
pub fn load_schema(path: &Path) -> Result<SchemaFile, SchemaError> {
    let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let schema: SchemaFile = toml::from_str(&content).map_err(|source| SchemaError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for warning in crate::config::validation::validate_schema(&schema) {
        tracing::warn!(path = %path.display(), "{}", warning);
    }

    tracing::debug!(
        path = %path.display(),
        parameters = schema.parameters.len(),
        "Schema loaded"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_is_truthiness() {
        assert_eq!(ValueType::Bool.convert("true").unwrap(), Value::Bool(true));
        assert_eq!(ValueType::Bool.convert("false").unwrap(), Value::Bool(true));
        assert_eq!(ValueType::Bool.convert("0").unwrap(), Value::Bool(true));
        assert_eq!(ValueType::Bool.convert("").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_str_keeps_text() {
        assert_eq!(
            ValueType::Str.convert("Alice").unwrap(),
            Value::Str("Alice".into())
        );
        assert_eq!(ValueType::Str.convert("").unwrap(), Value::Str(String::new()));
    }

    #[test]
    fn test_int_and_float_conversion() {
        assert_eq!(ValueType::Int.convert("42").unwrap(), Value::Int(42));
        assert_eq!(ValueType::Float.convert("2.5").unwrap(), Value::Float(2.5));
        assert!(ValueType::Int.convert("abc").is_err());
    }

    #[test]
    fn test_optional_set_from_variants() {
        assert!(OptionalSet::from(None::<&str>).is_empty());

        let one = OptionalSet::from("debug");
        assert_eq!(one.len(), 1);
        assert!(one.contains("debug"));

        let many = OptionalSet::from(vec!["a", "b", "a"]);
        assert_eq!(many.len(), 2);
        assert!(many.contains("b"));
    }

    #[test]
    fn test_schema_file_parse() {
        let schema: SchemaFile = toml::from_str(
            r#"
            optional = "name"

            [parameters]
            count = "int"
            name = "string"
            ratio = "float"
            debug = "boolean"
            "#,
        )
        .unwrap();

        assert_eq!(schema.parameters.get("count"), Some(ValueType::Int));
        assert_eq!(schema.parameters.get("name"), Some(ValueType::Str));
        assert_eq!(schema.parameters.get("debug"), Some(ValueType::Bool));
        assert!(schema.optional().contains("name"));
        assert_eq!(schema.parameters.len(), 4);
    }

    #[test]
    fn test_schema_file_rejects_unknown_type() {
        let result: Result<SchemaFile, _> = toml::from_str(
            r#"
            [parameters]
            count = "decimal"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_iter_in_insertion_order() {
        let schema = Schema::new()
            .with("ratio", ValueType::Float)
            .with("count", ValueType::Int);
        let entries: Vec<_> = schema.iter().collect();
        assert_eq!(
            entries,
            [("ratio", ValueType::Float), ("count", ValueType::Int)]
        );
    }

    #[test]
    fn test_value_type_display() {
        assert_eq!(ValueType::Float.to_string(), "float");
        assert_eq!(ValueType::Str.to_string(), "str");
    }
}
