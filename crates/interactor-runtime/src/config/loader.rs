//! Configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables `interactor.toml`
//! - `yaml-config`: enables `interactor.yaml` / `interactor.yml`
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Programmatic overrides passed to [`ConfigLoader::merge`]
//! 3. Config file (explicit, or the first one found on the search paths)
//! 4. Environment variables (`INTERACTOR_*`)
//!
//! # Environment Variable Mapping
//!
//! Variables use the `INTERACTOR_` prefix with `__` as the nesting separator:
//!
//! - `INTERACTOR_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `INTERACTOR_DISPATCHER__REJECT_DUPLICATES=true` → `dispatcher.reject_duplicates = true`
//!
//! # Example
//!
//! ```rust,ignore
//! use interactor_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("./config/interactor.toml")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::schema::InteractorConfig;

/// Prefix of the environment variables read by the loader.
pub const ENV_PREFIX: &str = "INTERACTOR_";

/// Base name of configuration files.
const FILE_STEM: &str = "interactor";

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Programmatic overrides.
    figment: Figment,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    ///
    /// Without any, the current directory and the user config directory
    /// are searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skips the `INTERACTOR_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges configuration programmatically.
    pub fn merge(mut self, config: InteractorConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<InteractorConfig> {
        let config: InteractorConfig = self
            .build_figment()?
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))?;

        debug!(
            logging_level = %config.logging.level,
            reject_duplicates = config.dispatcher.reject_duplicates,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn build_figment(self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(InteractorConfig::default()))
            .merge(self.figment);

        match &self.config_file {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading configuration file");
                figment = merge_config_file(figment, path)?;
            }
            Some(path) => return Err(ConfigError::FileNotFound(path.clone())),
            None => figment = search_config_file(figment, &resolve_search_paths(&self.search_paths)),
        }

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "Loading environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }
}

/// Loads the configuration from the default locations.
pub fn load_config() -> ConfigResult<InteractorConfig> {
    ConfigLoader::new().load()
}

/// Merges a single file, dispatching on its extension.
fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        #[cfg(feature = "toml-config")]
        "toml" => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}

fn resolve_search_paths(configured: &[PathBuf]) -> Vec<PathBuf> {
    if !configured.is_empty() {
        return configured.to_vec();
    }

    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(FILE_STEM));
    }
    paths
}

/// Merges the first config file found on `search_paths`.
fn search_config_file(figment: Figment, search_paths: &[PathBuf]) -> Figment {
    let extensions: &[&str] = &[
        #[cfg(feature = "toml-config")]
        "toml",
        #[cfg(feature = "yaml-config")]
        "yaml",
        #[cfg(feature = "yaml-config")]
        "yml",
    ];

    for dir in search_paths {
        for ext in extensions {
            let path = dir.join(format!("{FILE_STEM}.{ext}"));
            if path.exists() {
                info!(path = %path.display(), "Loading configuration file");
                // Only enabled extensions are listed, so merging cannot fail.
                return merge_config_file(figment.clone(), &path).unwrap_or(figment);
            }
        }
    }

    debug!("No configuration file found, using defaults");
    figment
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogFormat, LogLevel};
    use figment::Jail;

    fn load(loader: ConfigLoader) -> figment::Result<InteractorConfig> {
        loader.load().map_err(|e| e.to_string().into())
    }

    #[test]
    fn test_default_config() {
        Jail::expect_with(|jail| {
            let config = load(ConfigLoader::new().search_path(jail.directory()).without_env())?;
            assert_eq!(config.logging.level.as_str(), "info");
            assert!(!config.dispatcher.reject_duplicates);
            Ok(())
        });
    }

    #[test]
    fn test_file_found_on_search_path() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "interactor.toml",
                r#"
                [logging]
                level = "debug"
                format = "pretty"

                [logging.filters]
                interactor_core = "trace"

                [dispatcher]
                reject_duplicates = true
                "#,
            )?;

            let config = load(ConfigLoader::new().search_path(jail.directory()).without_env())?;
            assert_eq!(config.logging.level, LogLevel::Debug);
            assert_eq!(config.logging.format, LogFormat::Pretty);
            assert_eq!(config.logging.filters.get("interactor_core"), Some(&LogLevel::Trace));
            assert!(config.dispatcher.reject_duplicates);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[logging]\nlevel = \"warn\"\n")?;
            jail.set_env("INTERACTOR_LOGGING__LEVEL", "error");
            jail.set_env("INTERACTOR_DISPATCHER__REJECT_DUPLICATES", "true");

            let config = load(ConfigLoader::new().file(jail.directory().join("custom.toml")))?;
            assert_eq!(config.logging.level, LogLevel::Error);
            assert!(config.dispatcher.reject_duplicates);

            let config = load(
                ConfigLoader::new()
                    .file(jail.directory().join("custom.toml"))
                    .without_env(),
            )?;
            assert_eq!(config.logging.level, LogLevel::Warn);
            assert!(!config.dispatcher.reject_duplicates);
            Ok(())
        });
    }

    #[test]
    fn test_merge_overrides_defaults() {
        Jail::expect_with(|jail| {
            let mut overrides = InteractorConfig::default();
            overrides.dispatcher.reject_duplicates = true;

            let config = load(
                ConfigLoader::new()
                    .search_path(jail.directory())
                    .without_env()
                    .merge(overrides),
            )?;
            assert!(config.dispatcher.reject_duplicates);
            Ok(())
        });
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        Jail::expect_with(|jail| {
            let missing = ConfigLoader::new().file(jail.directory().join("absent.toml")).load();
            assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));

            jail.create_file("interactor.ini", "level = debug")?;
            let unsupported = ConfigLoader::new()
                .file(jail.directory().join("interactor.ini"))
                .load();
            assert!(matches!(unsupported, Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_reported() {
        Jail::expect_with(|jail| {
            jail.set_env("INTERACTOR_LOGGING__LEVEL", "loud");
            let result = ConfigLoader::new().search_path(jail.directory()).load();
            assert!(matches!(result, Err(ConfigError::Extract(_))));
            Ok(())
        });
    }
}
