//! Fatal errors.
//!
//! Malformed stylesheets never produce these; they degrade to diagnostics.
//! Only a bad entry path or an unreadable file stops processing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StylableError {
    #[error("entry path must be absolute: {}", .0.display())]
    RelativePath(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, StylableError>;
