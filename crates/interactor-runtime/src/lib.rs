//! Interactor Runtime - configuration and logging for interactor applications.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`, `InteractorConfig`)
//! - Logging initialization over `tracing-subscriber`
//! - [`bootstrap`], which wires both into a configured [`Dispatcher`]
//!
//! ```rust,ignore
//! use interactor_runtime::{ConfigLoader, bootstrap};
//!
//! fn main() -> anyhow::Result<()> {
//!     let dispatcher = bootstrap(ConfigLoader::new())?;
//!     dispatcher.register(&CreateUser::default(), must_adapt_fn(create_user));
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;

use interactor_core::Dispatcher;
use tracing::info;

pub use config::{
    ConfigError, ConfigLoader, ConfigResult, DispatcherConfig, InteractorConfig, LogFormat,
    LogLevel, LogOutput, LoggingConfig, SpanEventConfig, load_config,
};
pub use logging::{LoggingBuilder, SpanEvents, init_from_config};

/// Loads configuration, initializes logging and returns an empty dispatcher
/// configured accordingly.
pub fn bootstrap(loader: ConfigLoader) -> ConfigResult<Dispatcher> {
    let config = loader.load()?;
    init_from_config(&config.logging);

    let dispatcher = config.dispatcher.build();
    info!(policy = ?dispatcher.policy(), "Dispatcher ready");
    Ok(dispatcher)
}
