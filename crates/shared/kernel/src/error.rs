use std::borrow::Cow;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading a configuration or checking it for a consumer.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The source could not be read, parsed or deserialized.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// The record is well-formed but unusable (empty path, empty profile set, ...).
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A consumer asked for a profile set that is not defined.
    #[error(
        "Profile set '{name}' not found{} (available: {})",
        format_context(.context),
        format_available(.available)
    )]
    ProfileSetNotFound { name: String, available: Vec<String>, context: Option<Cow<'static, str>> },
}

/// Adds `.context(...)` to results that can become a [`ConfigError`].
pub trait ConfigErrorExt<T> {
    /// Attaches a human-readable context to the error, if any.
    ///
    /// # Errors
    /// Returns the original error converted into [`ConfigError`] with the context attached.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> ConfigErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                ConfigError::Config { context: c, .. }
                | ConfigError::Invalid { context: c, .. }
                | ConfigError::ProfileSetNotFound { context: c, .. } => {
                    *c = Some(context.into());
                },
            }
            e
        })
    }
}

impl<T> ConfigErrorExt<T> for std::result::Result<T, config::ConfigError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

impl From<config::ConfigError> for ConfigError {
    #[inline]
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Invalid { message: message.into(), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

fn format_available(available: &[String]) -> Cow<'static, str> {
    if available.is_empty() { Cow::Borrowed("none") } else { Cow::Owned(available.join(", ")) }
}
