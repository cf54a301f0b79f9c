use thiserror::Error;

use crate::value::ValueKind;

/// Error returned by listener callbacks.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PropertiesError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid key '{key}' or key value separator '{separator}'")]
    KeyNotFound { key: String, separator: String },

    #[error("value of '{key}' must start and end with '\"': {value}")]
    MalformedQuotedValue { key: String, value: String },

    #[error("cannot parse '{value}' of key '{key}' as {kind}: {message}")]
    Parse {
        key: String,
        value: String,
        kind: ValueKind,
        message: String,
    },

    #[error("a listener must be registered before reading with listeners")]
    NoListenersRegistered,

    #[error("listener failed for key '{key}': {source}")]
    Listener {
        key: String,
        #[source]
        source: ListenerError,
    },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PropertiesError>;
