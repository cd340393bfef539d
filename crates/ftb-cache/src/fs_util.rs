//! Atomic replace-on-write for store files.
//!
//! Content goes to a temporary file in the destination directory, is synced,
//! and is then renamed over the target. Readers see either the old file or
//! the complete new one, never a torn write.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::CacheError;

/// Replace `path` with `bytes`, creating parent directories as needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| CacheError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CacheError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| CacheError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| CacheError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| CacheError::io(path, e.error))?;
    Ok(())
}

/// Read a file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, CacheError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CacheError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_whole_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("table.json");

        write_atomic(&path, b"first version, longer").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_optional(&dir.path().join("absent")).unwrap().is_none());
    }
}
