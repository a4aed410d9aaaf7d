mod error;
pub use error::{ExecError, ExecResult};

mod util;

#[cfg(feature = "proc")]
pub mod proc;
#[cfg(feature = "proc")]
pub use proc::{InvokerConfig, RuntimeInvoker};

pub mod prelude {
    #[cfg(feature = "proc")]
    pub use crate::{InvokerConfig, RuntimeInvoker};
    pub use crate::error::{ExecError, ExecResult};
}
