use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

use stress_core::RunConfig;
use stress_exec::InvokerConfig;
use stress_model::StopCondition;
use stress_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

/// Launch containers concurrently against a container runtime and report throughput.
#[derive(Parser, Debug)]
#[command(name = "stress", version, about, long_about = None)]
pub struct Cli {
    /// Path to the container runtime binary
    #[arg(long, default_value = "docker")]
    pub binary: String,

    /// Workload file: JSON array of {name, args, flags, publish, kill}
    #[arg(long, default_value = "stress.json")]
    pub config: PathBuf,

    /// Number of concurrent workers
    #[arg(long, default_value_t = 1, value_parser = parse_workers)]
    pub concurrent: usize,

    /// How long to keep launching containers
    #[arg(long, default_value = "10m", value_parser = humantime::parse_duration)]
    pub duration: Duration,

    /// Stop after this many containers instead of after --duration
    #[arg(long, conflicts_with = "duration")]
    pub containers: Option<u64>,

    /// Send SIGTERM to containers marked `kill` after this delay
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    pub kill: Duration,

    /// Do not pass --rm to the runtime (item flags may then carry it)
    #[arg(long)]
    pub no_rm: bool,

    /// Working directory for runtime invocations
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Log filter directive; overrides --debug
    #[arg(long)]
    pub log_level: Option<LoggerLevel>,

    /// Log format (text|json)
    #[arg(long, default_value = "text")]
    pub log_format: LoggerFormat,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(n)
}

impl Cli {
    pub fn stop_condition(&self) -> StopCondition {
        match self.containers {
            Some(n) => StopCondition::MaxAttempts(n),
            None => StopCondition::Duration(self.duration),
        }
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            workers: self.concurrent,
            stop: self.stop_condition(),
        }
    }

    pub fn invoker_config(&self) -> InvokerConfig {
        InvokerConfig {
            binary: self.binary.clone(),
            kill_after: self.kill,
            remove: !self.no_rm,
            cwd: self.cwd.clone(),
        }
    }

    pub fn logger_config(&self) -> LoggerConfig {
        let cfg = LoggerConfig::verbose(self.debug).with_format(self.log_format);
        match &self.log_level {
            Some(level) => cfg.with_level(level.clone()),
            None => cfg,
        }
    }
}
