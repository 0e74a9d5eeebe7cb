//! Import request resolution.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::trace;

use crate::processor::{normalize, resolve_from};

use super::file_system::FileSystem;

/// Maps an import request, seen from a directory, to an absolute path.
pub trait RequestResolver {
    fn resolve(&self, context: &Path, request: &str) -> Option<PathBuf>;
}

/// Resolves absolute and `./` / `../` requests lexically and bare package
/// requests by walking up `node_modules` directories.
#[derive(Clone)]
pub struct DefaultRequestResolver {
    fs: Rc<dyn FileSystem>,
}

impl DefaultRequestResolver {
    pub fn new(fs: Rc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl RequestResolver for DefaultRequestResolver {
    fn resolve(&self, context: &Path, request: &str) -> Option<PathBuf> {
        if request.starts_with('.') || Path::new(request).is_absolute() {
            return Some(resolve_from(context, request));
        }
        let mut dir = Some(context);
        while let Some(current) = dir {
            let candidate = normalize(&current.join("node_modules").join(request));
            trace!(candidate = %candidate.display(), "package request");
            if self.fs.exists(&candidate) {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }
}
