//! Hand-off to the pipeline script.

use std::convert::Infallible;
use std::process::Command;

use camino::Utf8Path;
use tracing::debug;

use structsearch_utils::DispatchError;

use crate::plan::CommandPlan;

/// Environment variable carrying the launcher binary path, so the script
/// can re-invoke individual pipeline stages.
pub const LAUNCHER_ENV: &str = "STRUCTSEARCH";

/// Execute the materialized pipeline script with the plan as environment
/// and `args` as its argument list.
///
/// On success this never returns: the script replaces the calling process
/// image and owns the rest of the workflow. Any `Ok` value is therefore
/// uninhabited, and a caller that observes control coming back maps it to
/// an internal-invariant error.
pub fn dispatch(
    script: &Utf8Path,
    plan: &CommandPlan,
    args: &[String],
) -> Result<Infallible, DispatchError> {
    let mut cmd = Command::new(script.as_std_path());
    cmd.args(args);
    for (name, value) in plan.env_vars() {
        cmd.env(name, value);
    }
    if let Ok(exe) = std::env::current_exe() {
        cmd.env(LAUNCHER_ENV, exe);
    }
    debug!(script = %script, args = args.len(), "dispatching pipeline script");

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // exec only returns on failure.
        let source = cmd.exec();
        return Err(DispatchError::Exec {
            script: script.to_string(),
            source,
        });
    }

    #[cfg(not(unix))]
    {
        // No exec on this platform: run the script to completion and
        // forward its exit status, which still never hands control back
        // to the workflow.
        let status = cmd.status().map_err(|source| DispatchError::Exec {
            script: script.to_string(),
            source,
        })?;
        std::process::exit(status.code().unwrap_or(1));
    }
}
