//! Compiler facade.
//!
//! Wires a file system, a JS module loader and a [`StylableConfig`] into one
//! [`FileProcessor`], [`Resolver`] and [`Transformer`] sharing a cache.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::config::StylableConfig;
use crate::error::{Result, StylableError};
use crate::js::JsModuleLoader;
use crate::processor::{Meta, Processor};
use crate::project::{DefaultRequestResolver, FileProcessor, FileSystem, RequestResolver};
use crate::resolver::Resolver;
use crate::transformer::{StylableResults, Transformer};

/// Entry point for compiling stylesheets of one project.
pub struct Stylable {
    config: StylableConfig,
    file_processor: Rc<FileProcessor>,
    resolver: Resolver,
    transformer: Transformer,
}

impl Stylable {
    pub fn new(config: StylableConfig, fs: Rc<dyn FileSystem>, js_loader: Rc<dyn JsModuleLoader>) -> Self {
        let request_resolver: Rc<dyn RequestResolver> = match config.request_resolver() {
            Some(resolver) => resolver.clone(),
            None => Rc::new(DefaultRequestResolver::new(fs.clone())),
        };
        let processor = Processor::new(config.namespace_resolver().clone());
        let file_processor = Rc::new(FileProcessor::new(fs, processor, request_resolver));
        let resolver = Resolver::new(file_processor.clone(), js_loader);
        let transformer = Transformer::new(resolver.clone());
        Self {
            config,
            file_processor,
            resolver,
            transformer,
        }
    }

    pub fn config(&self) -> &StylableConfig {
        &self.config
    }

    pub fn file_processor(&self) -> &Rc<FileProcessor> {
        &self.file_processor
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Process (or fetch from cache) the stylesheet at an absolute path.
    pub fn process(&self, path: impl AsRef<Path>) -> Result<Rc<Meta>> {
        let path = absolute(path.as_ref())?;
        self.file_processor.process(&path)
    }

    /// Process and transform the stylesheet at an absolute path.
    pub fn transform(&self, path: impl AsRef<Path>) -> Result<StylableResults> {
        let meta = self.process(path)?;
        Ok(self.transform_meta(&meta))
    }

    /// Transform source text as if it were stored at `path`, without
    /// touching the file system for the entry itself.
    pub fn transform_source(&self, source: &str, path: impl AsRef<Path>) -> Result<StylableResults> {
        let path = absolute(path.as_ref())?;
        let meta = self.file_processor.processor().process_source(source, &path);
        let meta = self.file_processor.add(path, meta);
        Ok(self.transform_meta(&meta))
    }

    pub fn transform_meta(&self, meta: &Rc<Meta>) -> StylableResults {
        debug!(
            source = %meta.source.display(),
            root_dir = %self.config.root_dir().display(),
            "stylable transform"
        );
        self.transformer.transform(meta)
    }

    /// Drop the cached meta of one stylesheet.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.file_processor.invalidate(path)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Err(StylableError::RelativePath(path.to_path_buf()))
    }
}
