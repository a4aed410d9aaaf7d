use std::{path::PathBuf, process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Child,
    task::JoinHandle,
};
use tracing::{debug, trace, warn};

use stress_core::{Invoker, Outcome};
use stress_model::WorkItem;

use crate::{
    error::{ExecError, ExecResult},
    util::{cmd_program, kill_graceful},
};

mod args;
pub use args::build_run_args;

pub mod flags;

/// How the container runtime is invoked.
#[derive(Clone, Debug)]
pub struct InvokerConfig {
    /// Runtime executable (`docker`, `podman`, or a full path).
    pub binary: String,
    /// Delay before `SIGTERM` is sent to items with `kill` enabled.
    pub kill_after: Duration,
    /// Pass `--rm` and reserve it against item flags.
    pub remove: bool,
    /// Working directory for the runtime process; inherited when `None`.
    pub cwd: Option<PathBuf>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            kill_after: Duration::from_secs(10),
            remove: true,
            cwd: None,
        }
    }
}

/// Invoker that launches `<binary> run ...` for each work item.
pub struct RuntimeInvoker {
    name: &'static str,
    cfg: InvokerConfig,
}

impl RuntimeInvoker {
    pub fn new(cfg: InvokerConfig) -> Self {
        Self {
            name: "runtime",
            cfg,
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.cfg
    }

    /// Check that the runtime binary can be started at all (`<binary> --version`).
    ///
    /// Only a spawn failure is an error; a non-zero exit is logged and tolerated.
    pub async fn probe(&self) -> ExecResult<()> {
        let output = cmd_program(&self.cfg.binary, &["--version".to_string()], self.cfg.cwd.as_deref())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ExecError::Spawn(format!("{}: {e}", self.cfg.binary)))?;

        if output.status.success() {
            debug!(
                target: "stress.exec",
                binary = %self.cfg.binary,
                version = %String::from_utf8_lossy(&output.stdout).trim(),
                "runtime binary available"
            );
        } else {
            warn!(target: "stress.exec", binary = %self.cfg.binary, status = %output.status, "runtime version probe exited non-zero");
        }
        Ok(())
    }

    async fn run(&self, item: &WorkItem) -> ExecResult<()> {
        let args = build_run_args(&self.cfg, item);
        trace!(target: "stress.exec", binary = %self.cfg.binary, args = ?args, "spawn");

        let mut child = cmd_program(&self.cfg.binary, &args, self.cfg.cwd.as_deref())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExecError::Spawn(format!("{}: {e}", self.cfg.binary)))?;

        let stdout = read_pipe(child.stdout.take());
        let stderr = read_pipe(child.stderr.take());

        let kill_after = item.kill.then_some(self.cfg.kill_after);
        let status = wait_or_terminate(&mut child, kill_after, &item.name).await?;

        let stdout = stdout.await.unwrap_or_default();
        let stderr = stderr.await.unwrap_or_default();
        let output = join_output(&stdout, &stderr);

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ExecError::NonZeroExit { code, output }),
            None => Err(ExecError::KilledBySignal {
                signal: exit_signal(&status),
                output,
            }),
        }
    }
}

#[async_trait]
impl Invoker for RuntimeInvoker {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn invoke(&self, item: &WorkItem) -> Outcome {
        match self.run(item).await {
            Ok(()) => {
                trace!(target: "stress.exec", item = %item.name, "exit success");
                Outcome::Success
            }
            Err(e) => {
                warn!(
                    target: "stress.exec",
                    item = %item.name,
                    error = %e,
                    output = e.output().unwrap_or_default(),
                    "invocation failed"
                );
                Outcome::Failure
            }
        }
    }
}

/// Wait for the child; with a kill delay, send `SIGTERM` once it elapses and keep waiting.
///
/// The timer and the wait run in the same task, and the child is not reaped before the signal
/// is sent, so the pid still belongs to it.
async fn wait_or_terminate(
    child: &mut Child,
    kill_after: Option<Duration>,
    item: &str,
) -> std::io::Result<std::process::ExitStatus> {
    let Some(delay) = kill_after else {
        return child.wait().await;
    };

    tokio::select! {
        status = child.wait() => return status,
        _ = tokio::time::sleep(delay) => {}
    }

    debug!(target: "stress.exec", item, ?delay, "kill delay elapsed; sending SIGTERM");
    if let Err(e) = kill_graceful(child) {
        debug!(target: "stress.exec", item, error = %e, "signal delivery failed");
    }
    child.wait().await
}

/// Drain a child pipe on its own task so a full pipe never blocks the child.
fn read_pipe<R>(pipe: Option<R>) -> JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            if let Err(e) = pipe.read_to_end(&mut buf).await {
                trace!(target: "stress.exec", error = %e, "pipe read failed");
            }
        }
        buf
    })
}

/// All of stdout followed by all of stderr.
///
/// The streams are captured on separate pipes, so lines are not interleaved in emission order.
fn join_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut out = String::from_utf8_lossy(stdout).into_owned();
    out.push_str(&String::from_utf8_lossy(stderr));
    out.trim_end().to_string()
}

#[cfg(target_family = "unix")]
fn exit_signal(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or_default()
}

#[cfg(not(target_family = "unix"))]
fn exit_signal(_status: &std::process::ExitStatus) -> i32 {
    0
}
