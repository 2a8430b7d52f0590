//! The two known script payloads and their materialization.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use structsearch_utils::atomic_write::write_executable_atomic;
use structsearch_utils::DispatchError;

/// One of the two pipeline script payloads shipped with the launcher.
///
/// The payload contents are opaque to the launcher; only the name and the
/// variable bindings they consume are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPayload {
    /// Single-pass search.
    Search,
    /// Iterative profile-based search, selected when the iteration count
    /// is greater than one.
    IterativeSearch,
}

impl ScriptPayload {
    /// File name the payload is materialized under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Search => "structsearch.sh",
            Self::IterativeSearch => "structiterativesearch.sh",
        }
    }

    /// The embedded payload text.
    #[must_use]
    pub const fn content(self) -> &'static str {
        match self {
            Self::Search => include_str!("../payloads/structsearch.sh"),
            Self::IterativeSearch => include_str!("../payloads/structiterativesearch.sh"),
        }
    }

    /// Write the payload into `workspace` and mark it executable.
    ///
    /// The write is atomic, so a process reusing the same workspace never
    /// observes a half-written script.
    pub fn materialize(self, workspace: &Utf8Path) -> Result<Utf8PathBuf, DispatchError> {
        let path = workspace.join(self.name());
        write_executable_atomic(&path, self.content().as_bytes()).map_err(|e| {
            DispatchError::Materialize {
                name: self.name(),
                dir: workspace.to_string(),
                source: std::io::Error::other(format!("{e:#}")),
            }
        })?;
        debug!(script = %path, "materialized pipeline script");
        Ok(path)
    }
}
