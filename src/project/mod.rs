//! Project plumbing: file access, request resolution and the memoizing
//! file processor shared by the resolver and the transformer.

mod file_processor;
mod file_system;
mod request;

pub use file_processor::{FileProcessor, ProcessorCache};
pub use file_system::{FileSystem, MemoryFileSystem, Mtime, OsFileSystem};
pub use request::{DefaultRequestResolver, RequestResolver};
