//! Compiler configuration.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::processor::{HashedNamespace, NamespaceResolver};
use crate::project::RequestResolver;

/// Settings of a [`Stylable`](crate::Stylable) instance.
///
/// ```
/// use std::rc::Rc;
/// use stylable::StylableConfig;
/// use stylable::processor::IdentityNamespace;
///
/// let config = StylableConfig::new("/project").with_namespace_resolver(Rc::new(IdentityNamespace));
/// assert_eq!(config.root_dir(), std::path::Path::new("/project"));
/// ```
#[derive(Clone)]
pub struct StylableConfig {
    root_dir: PathBuf,
    namespace_resolver: Rc<dyn NamespaceResolver>,
    /// `None` selects the node_modules-walking default over the project file system.
    request_resolver: Option<Rc<dyn RequestResolver>>,
}

impl Default for StylableConfig {
    fn default() -> Self {
        Self::new("/")
    }
}

impl StylableConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            namespace_resolver: Rc::new(HashedNamespace),
            request_resolver: None,
        }
    }

    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    pub fn with_namespace_resolver(mut self, resolver: Rc<dyn NamespaceResolver>) -> Self {
        self.namespace_resolver = resolver;
        self
    }

    pub fn with_request_resolver(mut self, resolver: Rc<dyn RequestResolver>) -> Self {
        self.request_resolver = Some(resolver);
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn namespace_resolver(&self) -> &Rc<dyn NamespaceResolver> {
        &self.namespace_resolver
    }

    pub fn request_resolver(&self) -> Option<&Rc<dyn RequestResolver>> {
        self.request_resolver.as_ref()
    }
}
