//! Metadata root resolution.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CacheError;

/// Default snapshot folder under the root.
pub const SNAPSHOT_FOLDER: &str = "contracts_cache";

/// Directory holding every table and the snapshot folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRoot {
    path: PathBuf,
}

impl MetadataRoot {
    /// `<cwd>/<marker>` when it exists, otherwise `<home>/<marker>`, created
    /// if absent.
    pub fn resolve(marker: &str) -> Result<Self, CacheError> {
        let cwd = std::env::current_dir().map_err(|e| CacheError::io(".", e))?;
        let local = cwd.join(marker);
        if local.is_dir() {
            debug!(root = %local.display(), "using working-directory metadata root");
            return Ok(Self { path: local });
        }

        let home = home_dir().unwrap_or(cwd);
        Self::at(home.join(marker))
    }

    /// Use `path` as the root, creating it if absent.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        std::fs::create_dir_all(&path).map_err(|e| CacheError::io(&path, e))?;
        debug!(root = %path.display(), "metadata root ready");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a table file under the root.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Path of a sub-folder under the root, created if absent.
    pub fn folder(&self, name: &str) -> Result<PathBuf, CacheError> {
        let dir = self.path.join(name);
        std::fs::create_dir_all(&dir).map_err(|e| CacheError::io(&dir, e))?;
        Ok(dir)
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        self.path.join(SNAPSHOT_FOLDER)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let root = MetadataRoot::at(dir.path().join(".trader")).unwrap();
        assert!(root.path().is_dir());
        assert_eq!(root.file("stock_basic_info.json"), root.path().join("stock_basic_info.json"));
        assert_eq!(root.snapshot_dir(), root.path().join("contracts_cache"));
    }

    #[test]
    fn folder_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let root = MetadataRoot::at(dir.path()).unwrap();
        let sub = root.folder("contracts_cache").unwrap();
        assert!(sub.is_dir());
    }
}
