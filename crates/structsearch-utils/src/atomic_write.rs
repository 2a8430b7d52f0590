//! Atomic file writes.
//!
//! Write to a temporary file in the target directory, then rename into
//! place. A process reusing the same workspace concurrently never observes
//! a half-written file.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use camino::Utf8Path;
use tempfile::NamedTempFile;

/// Atomically write `content` to `path` using temp file + rename.
///
/// The temporary file is created in the same directory as the target so the
/// final rename stays on one filesystem.
pub fn write_file_atomic(path: &Utf8Path, content: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {dir}"))?;
    tmp.write_all(content)
        .with_context(|| format!("failed to write temporary file for {path}"))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to sync temporary file for {path}"))?;

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to rename temporary file into {path}"))?;

    Ok(())
}

/// Atomically write `content` to `path` and mark it executable.
pub fn write_executable_atomic(path: &Utf8Path, content: &[u8]) -> Result<()> {
    write_file_atomic(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o755);
        fs::set_permissions(path, perms)
            .with_context(|| format!("failed to mark {path} executable"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn tmp_path(td: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(td.path().join(name)).unwrap()
    }

    #[test]
    fn writes_content() {
        let td = tempfile::TempDir::new().unwrap();
        let p = tmp_path(&td, "out.txt");
        write_file_atomic(&p, b"hello").unwrap();
        assert_eq!(fs::read(&p).unwrap(), b"hello");
    }

    #[test]
    fn overwrites_existing_file() {
        let td = tempfile::TempDir::new().unwrap();
        let p = tmp_path(&td, "out.txt");
        write_file_atomic(&p, b"first").unwrap();
        write_file_atomic(&p, b"second").unwrap();
        assert_eq!(fs::read(&p).unwrap(), b"second");
    }

    #[cfg(unix)]
    #[test]
    fn executable_write_sets_exec_bit() {
        use std::os::unix::fs::PermissionsExt;

        let td = tempfile::TempDir::new().unwrap();
        let p = tmp_path(&td, "run.sh");
        write_executable_atomic(&p, b"#!/bin/sh\n").unwrap();
        let mode = fs::metadata(&p).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
