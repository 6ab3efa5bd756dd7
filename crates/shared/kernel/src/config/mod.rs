use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Prefix for environment overrides (e.g. `MGKIT__PACKAGE_NAME`).
pub const ENV_PREFIX: &str = "MGKIT";

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Config file not found{}: {path}", format_context(.context))]
    Missing { path: String, context: Option<Cow<'static, str>> },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub trait ConfigErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> ConfigErrorExt<T> for std::result::Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// A reusable configuration loader that combines an optional TOML file with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Defaults**: Whatever `T` provides through `#[serde(default)]`.
/// 2. **Base File**: Loads settings from `path` when given. A missing file is an error only
///    when `required` is set; otherwise the layer is skipped.
/// 3. **Environment Overrides**: Overlays values from environment variables prefixed with `MGKIT__`.
///    Nested structures are accessed using double underscores (e.g., `MGKIT__LOG_DIR` maps to `log_dir`).
///
/// # Errors
/// This function will return an error if:
/// * `required` is set and the file does not exist.
/// * The content of the file or the environment does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use mgkit_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     #[serde(default)]
///     package_name: Option<String>,
/// }
///
/// let _cfg: AppConfig = load_config(None, false).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<&Path>, required: bool) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path {
        if path.exists() {
            info!("Loading config from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        } else if required {
            return Err(ConfigError::Missing {
                path: path.display().to_string(),
                context: Some("--config points to a missing file".into()),
            });
        } else {
            debug!("No config file at {}, using defaults", path.display());
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
    );

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
