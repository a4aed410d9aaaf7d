use thiserror::Error;
use tracing_subscriber::{filter::ParseError, util::TryInitError};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format `{0}` (expected text or json)")]
    InvalidFormat(String),

    #[error("invalid log filter `{directive}`: {source}")]
    InvalidLevel {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("failed to install tracing subscriber: {0}")]
    Install(TryInitError),
}

impl From<TryInitError> for LoggerError {
    fn from(e: TryInitError) -> Self {
        let taken = std::error::Error::source(&e)
            .is_some_and(|s| s.is::<tracing::dispatcher::SetGlobalDefaultError>());
        if taken {
            LoggerError::AlreadyInitialized
        } else {
            LoggerError::Install(e)
        }
    }
}
