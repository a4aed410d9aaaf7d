use std::path::Path;

use tokio::process::{Child, Command};

pub(crate) fn cmd_program(program: &str, args: &[String], cwd: Option<&Path>) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(|s| s.as_str()));
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    cmd
}

/// Send `SIGTERM` to a child that has not been reaped yet.
///
/// Once the child is reaped `id()` is `None` and nothing is signalled.
pub(crate) fn kill_graceful(child: &Child) -> std::io::Result<()> {
    match child.id() {
        Some(pid) => terminate(pid),
        None => Ok(()),
    }
}

/// Ask a process to stop with `SIGTERM`.
///
/// Delivery is best effort: the process may already have exited.
#[cfg(target_family = "unix")]
pub(crate) fn terminate(pid: u32) -> std::io::Result<()> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "pid out of range"))?;
    let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(target_family = "unix"))]
pub(crate) fn terminate(_pid: u32) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "graceful termination is only supported on unix",
    ))
}
