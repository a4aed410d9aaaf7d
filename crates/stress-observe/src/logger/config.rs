use std::{ffi::OsString, io::IsTerminal};

use crate::logger::{format::LoggerFormat, level::LoggerLevel};

/// Logger settings. Log lines always go to stderr; stdout is left to the run report.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    pub with_targets: bool,
    /// Tag lines with the runtime thread, useful to see workers spread across threads.
    pub with_thread_ids: bool,
    /// ANSI colors for the text format; json is never colored.
    pub use_color: bool,
}

impl LoggerConfig {
    /// `debug` when verbose, `info` otherwise.
    pub fn verbose(verbose: bool) -> Self {
        let level = if verbose {
            LoggerLevel::debug()
        } else {
            LoggerLevel::default()
        };
        Self {
            level,
            with_thread_ids: verbose,
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LoggerLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            with_targets: true,
            with_thread_ids: false,
            use_color: color_enabled(std::io::stderr().is_terminal(), std::env::var_os("NO_COLOR")),
        }
    }
}

/// Colors only on a terminal, and never when `NO_COLOR` is set to a non-empty value.
fn color_enabled(is_terminal: bool, no_color: Option<OsString>) -> bool {
    is_terminal && no_color.is_none_or(|v| v.is_empty())
}
