//! Memoizing stylesheet processor.
//!
//! Metas are cached by absolute path together with the modification stamp
//! they were built from; a lookup with a different stamp re-processes.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Result;
use crate::processor::{Import, Meta, Processor};

use super::file_system::{FileSystem, Mtime};
use super::request::RequestResolver;

/// Values keyed by path, valid for one modification stamp.
#[derive(Debug)]
pub struct ProcessorCache<T> {
    entries: FxHashMap<PathBuf, (Option<Mtime>, T)>,
}

impl<T> Default for ProcessorCache<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<T: Clone> ProcessorCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value, if it was stored for this exact stamp.
    pub fn get(&self, path: &Path, mtime: Mtime) -> Option<T> {
        match self.entries.get(path) {
            Some((Some(stored), value)) if *stored == mtime => Some(value.clone()),
            _ => None,
        }
    }

    /// The cached value regardless of its stamp.
    pub fn get_any(&self, path: &Path) -> Option<T> {
        self.entries.get(path).map(|(_, value)| value.clone())
    }

    pub fn set(&mut self, path: PathBuf, mtime: Option<Mtime>, value: T) {
        self.entries.insert(path, (mtime, value));
    }

    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads, processes and caches stylesheets.
pub struct FileProcessor {
    fs: Rc<dyn FileSystem>,
    processor: Processor,
    request_resolver: Rc<dyn RequestResolver>,
    cache: RefCell<ProcessorCache<Rc<Meta>>>,
}

impl FileProcessor {
    pub fn new(
        fs: Rc<dyn FileSystem>,
        processor: Processor,
        request_resolver: Rc<dyn RequestResolver>,
    ) -> Self {
        Self {
            fs,
            processor,
            request_resolver,
            cache: RefCell::new(ProcessorCache::new()),
        }
    }

    pub fn file_system(&self) -> &Rc<dyn FileSystem> {
        &self.fs
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    /// The meta of a stylesheet, re-processed only when its stamp changed.
    ///
    /// Metas seeded with [`add`](Self::add) for paths the file system does
    /// not know are served as-is.
    pub fn process(&self, path: &Path) -> Result<Rc<Meta>> {
        let mtime = match self.fs.modified(path) {
            Ok(mtime) => mtime,
            Err(err) => {
                return self.cache.borrow().get_any(path).ok_or(err);
            }
        };
        if let Some(meta) = self.cache.borrow().get(path, mtime) {
            debug!(path = %path.display(), "processor cache hit");
            return Ok(meta);
        }
        debug!(path = %path.display(), "processor cache miss");
        let text = self.fs.read_to_string(path)?;
        let meta = Rc::new(self.processor.process_source(&text, path));
        self.cache
            .borrow_mut()
            .set(path.to_path_buf(), Some(mtime), meta.clone());
        Ok(meta)
    }

    /// Seed the cache with an already processed meta.
    pub fn add(&self, path: impl Into<PathBuf>, meta: Meta) -> Rc<Meta> {
        let path = path.into();
        let mtime = self.fs.modified(&path).ok();
        let meta = Rc::new(meta);
        self.cache.borrow_mut().set(path, mtime, meta.clone());
        meta
    }

    pub fn invalidate(&self, path: &Path) -> bool {
        self.cache.borrow_mut().invalidate(path)
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Absolute path an import of `meta` points to.
    pub fn resolve_import(&self, meta: &Meta, import: &Import) -> Option<PathBuf> {
        let context = meta.source.parent().unwrap_or(Path::new("/"));
        self.request_resolver.resolve(context, &import.request)
    }
}
