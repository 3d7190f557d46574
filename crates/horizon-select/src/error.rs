//! Error types for Horizon Select.

use std::path::PathBuf;

use thiserror::Error;

use crate::option::OptionId;

/// Errors raised while loading or validating a [`SelectConfig`](crate::SelectConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two options share an id.
    #[error("duplicate option id {0}")]
    DuplicateOptionId(OptionId),

    /// An option has an empty display name.
    #[error("option {0} has an empty name")]
    EmptyOptionName(OptionId),

    /// The initial value references an id that is not in the option set.
    #[error("value references unknown option id {0}")]
    UnknownValueId(OptionId),

    /// A single-mode configuration selects more than one option.
    #[error("single mode accepts at most one selected option, got {count}")]
    TooManyValues { count: usize },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
