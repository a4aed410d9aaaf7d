use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("non-zero exit code: {code}")]
    NonZeroExit { code: i32, output: String },
    #[error("killed by signal {signal}")]
    KilledBySignal { signal: i32, output: String },
    #[error("io error: {0}")]
    Io(String),
}

impl ExecError {
    /// Combined stdout/stderr captured from the child, if it ran at all.
    pub fn output(&self) -> Option<&str> {
        match self {
            ExecError::NonZeroExit { output, .. } | ExecError::KilledBySignal { output, .. } => {
                Some(output)
            }
            ExecError::Spawn(_) | ExecError::Io(_) => None,
        }
    }
}

impl From<std::io::Error> for ExecError {
    fn from(e: std::io::Error) -> Self {
        ExecError::Io(e.to_string())
    }
}

pub type ExecResult<T> = Result<T, ExecError>;
