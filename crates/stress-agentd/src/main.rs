mod cli;
mod report;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use stress_core::Coordinator;
use stress_exec::RuntimeInvoker;
use stress_model::Catalog;
use stress_observe::init_logger;

use crate::{
    cli::{Cli, OutputFormat},
    report::Report,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1) Logger
    init_logger(&cli.logger_config()).context("logger initialization failed")?;

    // 2) Workload
    let catalog = Catalog::load(&cli.config)
        .with_context(|| format!("cannot load workload from {}", cli.config.display()))?;
    info!(path = %cli.config.display(), items = catalog.len(), "workload loaded");

    // 3) Runtime
    let invoker = RuntimeInvoker::new(cli.invoker_config());
    invoker
        .probe()
        .await
        .with_context(|| format!("cannot invoke runtime binary {}", cli.binary))?;

    // 4) Ctrl-C stops production; in-flight containers still finish
    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received; draining in-flight containers");
                signal.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for ctrl-c"),
        }
    });

    // 5) Run
    let summary = Coordinator::new(cli.run_config(), Arc::new(invoker))
        .with_shutdown(shutdown)
        .run(catalog)
        .await?;

    // 6) Report
    let report = Report::from(&summary);
    info!(%report, "done");
    match cli.output {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
