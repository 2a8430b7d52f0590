//! Content-addressed workspace resolution.
//!
//! Every invocation works inside `root/<identity>`, where the identity is a
//! blake3 digest over the canonical encoding of the invocation (database
//! identifiers, positional paths, full parameter set). Repeated invocations
//! with identical inputs resolve to the same directory and can reuse prior
//! work; `reuse_latest` skips hashing entirely and follows the `latest`
//! marker instead.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use structsearch_utils::paths::ensure_dir_all;
use structsearch_utils::WorkspaceError;

/// Name of the marker pointing at the most recently created workspace.
const LATEST_MARKER: &str = "latest";

/// Number of hex digits of the digest used as the workspace identity.
const IDENTITY_LEN: usize = 16;

/// Compute the workspace identity for canonical hash material.
#[must_use]
pub fn identity_from_material(material: &[u8]) -> String {
    let digest = blake3::hash(material);
    digest.to_hex()[..IDENTITY_LEN].to_string()
}

/// Resolve the workspace directory for one invocation.
///
/// With `reuse_latest`, the identity is read back from the `latest` marker
/// under `root` and `hash_material` is ignored; a missing or unreadable
/// marker is [`WorkspaceError::NotFound`]. Otherwise the identity is
/// computed from `hash_material`, the directory is created if absent
/// (concurrent creation by another process is success, not failure), and
/// the marker is repointed so the next `reuse_latest` run finds this
/// workspace.
pub fn resolve(
    root: &Utf8Path,
    reuse_latest: bool,
    hash_material: &[u8],
) -> Result<Utf8PathBuf, WorkspaceError> {
    let identity = if reuse_latest {
        read_latest_identity(root)?
    } else {
        identity_from_material(hash_material)
    };

    let path = root.join(&identity);
    ensure_dir_all(&path).map_err(|source| WorkspaceError::Create {
        path: path.to_string(),
        source,
    })?;
    debug!(workspace = %path, reused = reuse_latest, "resolved workspace");

    if !reuse_latest {
        update_latest_marker(root, &identity)?;
    }

    Ok(path)
}

/// Read the identity recorded by the `latest` marker.
fn read_latest_identity(root: &Utf8Path) -> Result<String, WorkspaceError> {
    let marker = root.join(LATEST_MARKER);
    let not_found = || WorkspaceError::NotFound {
        root: root.to_string(),
    };

    #[cfg(unix)]
    {
        let target = std::fs::read_link(&marker).map_err(|_| not_found())?;
        let identity = target
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(not_found)?;
        return Ok(identity);
    }

    #[cfg(not(unix))]
    {
        let identity = std::fs::read_to_string(&marker).map_err(|_| not_found())?;
        let identity = identity.trim().to_string();
        if identity.is_empty() {
            return Err(not_found());
        }
        return Ok(identity);
    }
}

/// Repoint the `latest` marker at `identity`.
///
/// The marker is written next to the workspaces and swapped in with a
/// rename, so a concurrent reader never sees a dangling half-written
/// marker.
fn update_latest_marker(root: &Utf8Path, identity: &str) -> Result<(), WorkspaceError> {
    let marker = root.join(LATEST_MARKER);
    let staging = root.join(format!("{LATEST_MARKER}.tmp"));
    let map_err = |source: std::io::Error| WorkspaceError::Marker {
        root: root.to_string(),
        source,
    };

    // A stale staging entry from an interrupted run must not block us.
    let _ = std::fs::remove_file(&staging);

    #[cfg(unix)]
    std::os::unix::fs::symlink(identity, &staging).map_err(map_err)?;

    #[cfg(not(unix))]
    std::fs::write(&staging, identity).map_err(map_err)?;

    std::fs::rename(&staging, &marker).map_err(map_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(td: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap()
    }

    #[test]
    fn identity_is_deterministic() {
        assert_eq!(
            identity_from_material(b"query\ntarget\n"),
            identity_from_material(b"query\ntarget\n")
        );
    }

    #[test]
    fn identity_is_sensitive_to_material() {
        assert_ne!(
            identity_from_material(b"query\ntarget\n"),
            identity_from_material(b"query\ntarget2\n")
        );
    }

    #[test]
    fn identity_has_fixed_length() {
        assert_eq!(identity_from_material(b"x").len(), IDENTITY_LEN);
    }

    #[test]
    fn resolve_creates_directory_under_root() {
        let td = tempfile::TempDir::new().unwrap();
        let ws = resolve(&root(&td), false, b"material").unwrap();
        assert!(ws.is_dir());
        assert_eq!(ws.parent().unwrap(), root(&td));
    }

    #[test]
    fn resolve_is_idempotent_for_equal_material() {
        let td = tempfile::TempDir::new().unwrap();
        let a = resolve(&root(&td), false, b"material").unwrap();
        let b = resolve(&root(&td), false, b"material").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn resolve_reuse_follows_marker_and_ignores_material() {
        let td = tempfile::TempDir::new().unwrap();
        let created = resolve(&root(&td), false, b"original material").unwrap();

        // Different material, reuse requested: same workspace.
        let reused = resolve(&root(&td), true, b"completely different").unwrap();
        assert_eq!(created, reused);
    }

    #[test]
    fn resolve_reuse_without_marker_fails() {
        let td = tempfile::TempDir::new().unwrap();
        let err = resolve(&root(&td), true, b"material").unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }));
    }

    #[test]
    fn marker_tracks_the_most_recent_workspace() {
        let td = tempfile::TempDir::new().unwrap();
        let _first = resolve(&root(&td), false, b"first").unwrap();
        let second = resolve(&root(&td), false, b"second").unwrap();

        let reused = resolve(&root(&td), true, b"").unwrap();
        assert_eq!(reused, second);
    }

    #[test]
    fn reuse_does_not_repoint_the_marker() {
        let td = tempfile::TempDir::new().unwrap();
        let first = resolve(&root(&td), false, b"first").unwrap();
        let _ = resolve(&root(&td), true, b"").unwrap();
        let reused_again = resolve(&root(&td), true, b"").unwrap();
        assert_eq!(first, reused_again);
    }
}
