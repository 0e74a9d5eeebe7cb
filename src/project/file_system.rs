//! File system abstraction.
//!
//! Everything that reads stylesheets goes through [`FileSystem`], so whole
//! projects can live in memory for tests and virtual builds.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rustc_hash::FxHashMap;

use crate::error::{Result, StylableError};

/// Modification stamp used for cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mtime {
    System(SystemTime),
    /// Monotonic revision of an in-memory file.
    Revision(u64),
}

pub trait FileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn modified(&self, path: &Path) -> Result<Mtime>;
    fn exists(&self, path: &Path) -> bool;
}

/// The real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| io_error(path, source))
    }

    fn modified(&self, path: &Path) -> Result<Mtime> {
        let metadata = std::fs::metadata(path).map_err(|source| io_error(path, source))?;
        let modified = metadata.modified().map_err(|source| io_error(path, source))?;
        Ok(Mtime::System(modified))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StylableError {
    if source.kind() == std::io::ErrorKind::NotFound {
        StylableError::NotFound(path.to_path_buf())
    } else {
        StylableError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// In-memory files. Every write bumps the file's revision.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RefCell<FxHashMap<PathBuf, (String, u64)>>,
    revision: Cell<u64>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(path, content)` pairs.
    pub fn with_files<P: Into<PathBuf>, C: Into<String>>(
        files: impl IntoIterator<Item = (P, C)>,
    ) -> Self {
        let fs = Self::new();
        for (path, content) in files {
            fs.write(path, content);
        }
        fs
    }

    pub fn write(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let revision = self.revision.get() + 1;
        self.revision.set(revision);
        self.files
            .borrow_mut()
            .insert(path.into(), (content.into(), revision));
    }

    pub fn remove(&self, path: &Path) -> bool {
        self.files.borrow_mut().remove(path).is_some()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .borrow()
            .get(path)
            .map(|(content, _)| content.clone())
            .ok_or_else(|| StylableError::NotFound(path.to_path_buf()))
    }

    fn modified(&self, path: &Path) -> Result<Mtime> {
        self.files
            .borrow()
            .get(path)
            .map(|(_, revision)| Mtime::Revision(*revision))
            .ok_or_else(|| StylableError::NotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}
