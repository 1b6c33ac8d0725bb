//! Atomic file replacement.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sibling temp path used while writing `path`, e.g. `out.xml.tmp`.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `content` to `path` atomically.
///
/// Writes to a temp file in the same directory first, then renames, so
/// readers never observe a half-written file.
pub(crate) fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);

    let written = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.xml");

        atomic_write(&path, "<a></a>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<a></a>");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xml");
        fs::write(&path, "old").unwrap();

        atomic_write(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn temp_path_is_sibling() {
        let p = Path::new("/tmp/x/project.MDProject");
        assert_eq!(temp_path_for(p), Path::new("/tmp/x/project.MDProject.tmp"));
    }
}
