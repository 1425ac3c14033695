use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable could not be bound to its field, e.g. a non-numeric
    /// value for a numeric field.
    #[error("failed to bind environment variables: {0}")]
    Binding(#[from] envy::Error),

    /// A variable was set to a value that is not valid unicode.
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(String),
}
