pub mod atomic_write;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod paths;

pub use error::{ConfigError, DispatchError, StructsearchError, WorkspaceError};
pub use exit_codes::ExitCode;
