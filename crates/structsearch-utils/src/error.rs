use std::io;
use thiserror::Error;

use crate::exit_codes::ExitCode;

/// Top-level error type returned by structsearch library operations.
///
/// Errors are organized by the component that raised them:
///
/// | Variant | Raised by |
/// |---------|-----------|
/// | `Config` | CLI/parameter validation before any workspace exists |
/// | `Workspace` | Workspace resolution (hashing, reuse marker, creation) |
/// | `Dispatch` | Payload materialization and hand-off to the runner |
/// | `Io` | Everything else touching the filesystem |
///
/// Library code returns `StructsearchError` and does NOT call
/// `std::process::exit()`; only the binary maps errors to exit codes via
/// [`to_exit_code()`](Self::to_exit_code).
#[derive(Error, Debug)]
pub enum StructsearchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl StructsearchError {
    /// Map this error to the documented CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::CLI_ARGS,
            Self::Workspace(_) => ExitCode::WORKSPACE,
            // A dispatcher that returned control is a programming defect,
            // not an execution failure.
            Self::Dispatch(DispatchError::Returned) => ExitCode::INTERNAL,
            Self::Dispatch(_) => ExitCode::DISPATCH_FAILURE,
            Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}

/// Configuration and argument validation errors.
///
/// These are surfaced before any workspace is created, so a misconfigured
/// invocation leaves no trace on disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The alignment type matched none of the known variants. Validated
    /// eagerly: the downstream script must never receive a plan without an
    /// algorithm directive.
    #[error(
        "invalid alignment type {0}: expected 0 (structure substitution), \
         1 (structural superposition) or 2 (combined structure-sequence)"
    )]
    InvalidAlignmentKind(i32),

    /// Too few positional arguments to split into query, target, results
    /// and workspace root.
    #[error("expected at least {expected} positional arguments, got {got}")]
    NotEnoughPositionals { expected: usize, got: usize },

    /// The number of search iterations must be at least 1.
    #[error("invalid iteration count {0}: must be >= 1")]
    InvalidIterationCount(u32),
}

/// Workspace resolution errors.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Reuse of the latest workspace was requested but no usable marker
    /// exists under the workspace root.
    #[error("no reusable workspace: missing or unreadable latest marker under {root}")]
    NotFound { root: String },

    /// Workspace directory creation failed for a reason other than the
    /// directory already existing.
    #[error("failed to create workspace directory {path}")]
    Create {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Updating the latest marker failed. The workspace itself is usable,
    /// but a later `--reuse-latest` run would not find it.
    #[error("failed to update latest marker under {root}")]
    Marker {
        root: String,
        #[source]
        source: io::Error,
    },
}

/// Dispatch errors.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Writing the script payload into the workspace failed.
    #[error("failed to materialize payload {name} into {dir}")]
    Materialize {
        name: &'static str,
        dir: String,
        #[source]
        source: io::Error,
    },

    /// Replacing the process image with the pipeline script failed.
    #[error("failed to execute pipeline script {script}")]
    Exec {
        script: String,
        #[source]
        source: io::Error,
    },

    /// The dispatcher returned control to the caller. The pipeline script
    /// replaces the calling process, so reaching this point at all signals
    /// a programming defect.
    #[error("dispatcher returned control to the launcher; this is a bug")]
    Returned,
}
