use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    Layer, Registry, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber: one stderr output layer plus the level filter.
pub(crate) fn install(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = cfg.level.to_filter()?;
    tracing_subscriber::registry()
        .with(output_layer(cfg))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn output_layer(cfg: &LoggerConfig) -> OutputLayer {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(cfg.with_targets)
        .with_thread_ids(cfg.with_thread_ids)
        .with_timer(local_rfc3339());

    match cfg.format {
        LoggerFormat::Text => layer.with_ansi(cfg.use_color).boxed(),
        LoggerFormat::Json => layer.json().with_ansi(false).boxed(),
    }
}

/// RFC3339 timestamps in the local offset, UTC when the offset cannot be determined.
fn local_rfc3339() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let cfg = LoggerConfig::default();
        // The first call installs unless another test in this binary already did.
        let _ = install(&cfg);
        assert!(matches!(
            install(&cfg.with_format(LoggerFormat::Json)),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}
