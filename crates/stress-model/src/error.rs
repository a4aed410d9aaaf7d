use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to open workload file {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed workload definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("workload catalog is empty")]
    EmptyCatalog,
    #[error("invalid work item #{index}: {reason}")]
    InvalidItem { index: usize, reason: String },
}
