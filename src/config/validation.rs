//! Configuration validation.
//!
//! # Responsibilities
//! - Reject parameters the schema does not know
//! - Convert raw text to the schema's target types
//! - Flag suspicious schema files (non-fatal)
//!
//! # Design Decisions
//! - Entries are checked in first-appearance order and the first failure
//!   aborts; no partial configuration is produced
//! - Each entry is looked up then converted before the next one is
//!   considered, so an earlier conversion failure wins over a later
//!   unknown name
//! - The optional set plays no part here

use std::fmt;

use crate::config::loader::ConfigError;
use crate::config::parser::RawEntries;
use crate::config::schema::{Schema, SchemaFile};
use crate::config::value::Configuration;

/// Check every raw entry against the schema and convert it.
pub fn typecast(entries: &RawEntries, schema: &Schema) -> Result<Configuration, ConfigError> {
    let mut config = Configuration::with_capacity(entries.len());

    for (name, entry) in entries {
        let ty = schema
            .get(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.clone()))?;

        let value = ty.convert(&entry.value).map_err(|source| ConfigError::Conversion {
            name: name.clone(),
            raw: entry.value.clone(),
            expected: ty,
            line: entry.line,
            source,
        })?;

        config.insert(name.clone(), value);
    }

    Ok(config)
}

/// Non-fatal issue found in a schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    /// A name listed as optional has no type in `[parameters]`.
    UnknownOptional(String),
    /// `[parameters]` is empty, so every non-empty file will be rejected.
    NoParameters,
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaWarning::UnknownOptional(name) => {
                write!(f, "optional parameter {} is not declared in [parameters]", name)
            }
            SchemaWarning::NoParameters => write!(f, "schema declares no parameters"),
        }
    }
}

/// Inspect a schema file for likely mistakes.
pub fn validate_schema(schema: &SchemaFile) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();

    if schema.parameters.is_empty() {
        warnings.push(SchemaWarning::NoParameters);
    }

    for name in schema.optional().iter() {
        if !schema.parameters.contains(name) {
            warnings.push(SchemaWarning::UnknownOptional(name.to_string()));
        }
    }

    warnings
}
