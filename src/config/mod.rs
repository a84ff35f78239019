//! Configuration reading subsystem.
//!
//! # Data Flow
//! ```text
//! config file (flat `name value` lines)
//!     → parser.rs (comment/blank filtering, single-space split)
//!     → validation.rs (unknown-name check, typecast per schema)
//!     → Configuration (typed, first-appearance order)
//!     → cached on the Configurator until the next successful read
//!
//! schema file (TOML)
//!     → schema.rs (deserialize parameter types, optional names)
//!     → validation.rs (non-fatal warnings)
//! ```
//!
//! # Design Decisions
//! - Malformed lines are dropped silently; unknown names and bad values fail
//!   the whole read
//! - No partial results: the cache only changes on success
//! - Optional names are recorded but never enforced

pub mod loader;
pub mod parser;
pub mod schema;
pub mod validation;
pub mod value;

pub use loader::{ConfigError, ConfigResult, Configurator};
pub use parser::RawEntry;
pub use schema::{load_schema, OptionalSet, Schema, SchemaError, SchemaFile, ValueType};
pub use value::{Configuration, ConversionError, Value};
