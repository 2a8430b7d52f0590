//! Small filesystem helpers shared across crates.

use camino::Utf8Path;

/// mkdir -p; treat `AlreadyExists` as success (removes TOCTTOU races).
///
/// Two processes resolving the same workspace identity may race on
/// creation; both must succeed.
pub fn ensure_dir_all(p: &Utf8Path) -> std::io::Result<()> {
    match std::fs::create_dir_all(p) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn ensure_dir_all_creates_nested_dirs() {
        let td = tempfile::TempDir::new().unwrap();
        let p = Utf8PathBuf::from_path_buf(td.path().join("a/b/c")).unwrap();
        ensure_dir_all(&p).unwrap();
        assert!(p.is_dir());
    }

    #[test]
    fn ensure_dir_all_is_idempotent() {
        let td = tempfile::TempDir::new().unwrap();
        let p = Utf8PathBuf::from_path_buf(td.path().join("ws")).unwrap();
        ensure_dir_all(&p).unwrap();
        ensure_dir_all(&p).unwrap();
        assert!(p.is_dir());
    }
}
