//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::parser::parse_entries;
use crate::config::schema::{OptionalSet, Schema, ValueType};
use crate::config::validation::typecast;
use crate::config::value::{Configuration, ConversionError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The path does not name an existing regular file.
    #[error("{} does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A parsed parameter has no entry in the schema.
    #[error("{0} is not a known configuration parameter")]
    UnknownParameter(String),

    /// A raw value could not be converted to its schema type.
    #[error("invalid value {raw:?} for {name} on line {line}: expected {expected}")]
    Conversion {
        name: String,
        raw: String,
        expected: ValueType,
        line: usize,
        #[source]
        source: ConversionError,
    },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reads flat configuration files against a fixed schema.
///
/// The last successfully read configuration is kept and available through
/// [`Configurator::config`]. A failed read leaves it untouched.
///
/// `read` takes `&mut self`; share a `Configurator` across threads only
/// behind a lock.
#[derive(Debug, Clone, Default)]
pub struct Configurator {
    schema: Schema,
    optional: OptionalSet,
    config: Option<Configuration>,
}

impl Configurator {
    /// Create a configurator for `schema` with no optional parameters.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            optional: OptionalSet::default(),
            config: None,
        }
    }

    /// Flag parameters as optional.
    ///
    /// Accepts a single name, a list of names, or `None`. The set is stored
    /// but not enforced by [`read`](Self::read).
    pub fn with_optional(mut self, optional: impl Into<OptionalSet>) -> Self {
        self.optional = optional.into();
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn optional(&self) -> &OptionalSet {
        &self.optional
    }

    /// The configuration produced by the last successful [`read`](Self::read).
    pub fn config(&self) -> Option<&Configuration> {
        self.config.as_ref()
    }

    /// Parse and typecast the configuration file at `path`.
    pub fn read(&mut self, path: impl AsRef<Path>) -> ConfigResult<Configuration> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = parse_entries(&content);
        let config = match typecast(&entries, &self.schema) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Configuration rejected");
                return Err(e);
            }
        };

        tracing::debug!(
            path = %path.display(),
            parameters = config.len(),
            "Configuration loaded"
        );

        self.config = Some(config.clone());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::value::Value;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_example() {
        let schema = Schema::new()
            .with("count", ValueType::Int)
            .with("name", ValueType::Str);
        let mut configurator = Configurator::new(schema);
        let file = write_config("count 5\nname Alice\n# comment\n");

        let config = configurator.read(file.path()).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config["count"], Value::Int(5));
        assert_eq!(config["name"], Value::Str("Alice".into()));
        assert_eq!(configurator.config(), Some(&config));
    }

    #[test]
    fn test_file_not_found() {
        let mut configurator = Configurator::new(Schema::new());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.conf");

        let err = configurator.read(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { ref path } if *path == missing));
        assert!(err.to_string().contains("missing.conf"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let mut configurator = Configurator::new(Schema::new());
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            configurator.read(dir.path()),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_failed_read_keeps_cache() {
        let schema = Schema::new().with("count", ValueType::Int);
        let mut configurator = Configurator::new(schema);

        let good = write_config("count 1\n");
        let cached = configurator.read(good.path()).unwrap();

        let unknown = write_config("extra 1\n");
        assert!(configurator.read(unknown.path()).is_err());
        assert_eq!(configurator.config(), Some(&cached));

        let invalid = write_config("count many\n");
        assert!(configurator.read(invalid.path()).is_err());
        assert_eq!(configurator.config(), Some(&cached));
    }

    #[test]
    fn test_optional_set_is_not_enforced() {
        let schema = Schema::new()
            .with("count", ValueType::Int)
            .with("name", ValueType::Str);
        let mut configurator = Configurator::new(schema).with_optional(vec!["name", "extra"]);
        assert!(configurator.optional().contains("extra"));

        // Missing parameters are not reported, optional or not.
        let file = write_config("count 1\n");
        assert_eq!(configurator.read(file.path()).unwrap().len(), 1);

        // Optional names still trip the unknown-parameter check.
        let file = write_config("extra 1\n");
        assert!(matches!(
            configurator.read(file.path()),
            Err(ConfigError::UnknownParameter(name)) if name == "extra"
        ));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let mut configurator = Configurator::new(Schema::new());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xfe count 1\n").unwrap();

        assert!(matches!(
            configurator.read(file.path()),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnknownParameter("extra".into());
        assert_eq!(err.to_string(), "extra is not a known configuration parameter");
    }
}
