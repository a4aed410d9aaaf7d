mod config;
mod error;
mod format;
mod level;
mod subscriber;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use level::LoggerLevel;

/// Install the global subscriber. Fails with [`LoggerError::AlreadyInitialized`] if one is
/// already installed.
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    subscriber::install(cfg)
}
