use mgkit_kernel::config::ConfigError;
use mgkit_registry::RegistryError;
use std::borrow::Cow;

/// Errors raised while planning or committing a scaffold.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// A request field does not match its format rule.
    #[error("{message}{}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Marker, identity, slot or key conflicts in the registry files.
    #[error(transparent)]
    Registry { source: RegistryError },

    /// A scaffold target already holds different content.
    #[error("File exists, use --force to overwrite: {path}")]
    ExistingFile { path: String },

    /// A registry file is absent from the project.
    #[error("Missing file: {path}")]
    MissingFile { path: String },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error(transparent)]
    Config { source: ConfigError },
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

pub trait ScaffoldErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> ScaffoldErrorExt<T> for std::result::Result<T, std::io::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| ScaffoldError::Io { source, context: Some(context.into()) })
    }
}

impl From<RegistryError> for ScaffoldError {
    fn from(source: RegistryError) -> Self {
        Self::Registry { source }
    }
}

impl From<ConfigError> for ScaffoldError {
    fn from(source: ConfigError) -> Self {
        Self::Config { source }
    }
}

impl From<std::io::Error> for ScaffoldError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl ScaffoldError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
