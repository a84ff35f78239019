//! Typed reader for flat `name value` configuration files.
//!
//! ```no_run
//! use configurator::{Configurator, Schema, ValueType};
//!
//! let schema = Schema::new()
//!     .with("count", ValueType::Int)
//!     .with("name", ValueType::Str);
//!
//! let mut configurator = Configurator::new(schema);
//! let config = configurator.read("app.conf")?;
//! println!("{:?}", config.get("count"));
//! # Ok::<(), configurator::ConfigError>(())
//! ```

pub mod config;
pub mod observability;

pub use config::{
    ConfigError, ConfigResult, Configuration, Configurator, OptionalSet, Schema, Value,
    ValueType,
};
