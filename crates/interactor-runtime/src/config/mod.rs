//! Configuration for interactor applications.
//!
//! Settings are layered with figment: built-in defaults, then an
//! `interactor.toml` (or `.yaml`) file, then `INTERACTOR_*` environment
//! variables.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config};
pub use schema::{
    DispatcherConfig, InteractorConfig, LogFormat, LogLevel, LogOutput, LoggingConfig,
    SpanEventConfig,
};
