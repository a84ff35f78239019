//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config subsystem:
//!     → tracing events (debug per read, trace per skipped line,
//!       warn for schema oddities)
//!
//! Consumers:
//!     → logging.rs subscriber installed by the binary (stderr)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is up to the
//!   application
//! - Human format by default, JSON for machine parsing

pub mod logging;

pub use logging::{init_logging, LogFormat};
