mod keys;
pub mod validation;

use crate::error::{ConfigErrorExt, Result};
use config::{Config, Environment, File, Map, Value, ValueKind};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use config::FileFormat;

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "forge";

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "FORGE";

/// Separator between the prefix and nested keys in environment variables.
pub const ENV_SEPARATOR: &str = "__";

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layering:
/// 1. **Base File**: Loads settings from a file (e.g., `forge.toml`). If no path is provided,
///    it defaults to the `forge` base name in the current working directory; the format
///    is inferred from the extension found on disk (TOML, JSON, YAML, ...).
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with
///    `FORGE__`. Nested keys are joined with double underscores, e.g.
///    `FORGE__PRINT_SERVER__ADDRESS` maps to `print_server.address`.
///
/// Overrides are always snake_case. When the file spells the same key in camelCase
/// (`printServer`), both spellings are folded into one entry before deserializing,
/// with the override taking precedence.
///
/// # Errors
/// Returns [`ConfigError::Config`](crate::error::ConfigError::Config) if the file cannot be
/// found or parsed, or if its content does not match the structure of `T`.
///
/// # Example
/// ```rust,no_run
/// use forge_kernel::config::load_config;
/// use forge_kernel::domain::config::ForgeConfig;
///
/// let cfg: ForgeConfig = load_config(Some("config/forge.toml")).unwrap();
/// println!("slicing with {}", cfg.slicer_location().display());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));

    info!("Loading config from {}", effective_path.display());

    let config = builder.build().context("Failed to build config")?;

    deserialize_unified(config).context("Failed to deserialize config")
}

/// Loads a configuration from an inline definition.
///
/// No environment layer is applied: the result depends on `content` alone.
///
/// # Errors
/// Returns [`ConfigError::Config`](crate::error::ConfigError::Config) if `content` is not valid
/// `format` or does not match the structure of `T`.
pub fn load_config_str<T>(content: &str, format: FileFormat) -> Result<T>
where
    T: DeserializeOwned,
{
    debug!(?format, bytes = content.len(), "Loading inline config");

    let config = Config::builder()
        .add_source(File::from_str(content, format))
        .build()
        .context("Failed to parse inline config")?;

    deserialize_unified(config).context("Failed to deserialize inline config")
}

fn deserialize_unified<T>(config: Config) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut table = config.try_deserialize::<Map<String, Value>>()?;
    keys::unify_key_spelling(&mut table);
    Ok(Value::new(None, ValueKind::Table(table)).try_deserialize::<T>()?)
}
