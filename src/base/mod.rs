//! Foundation types for the Stylable toolchain.
//!
//! This module provides fundamental types used throughout the compiler:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for CSS nodes
//! - Domain constants (file extensions, directive names)
//!
//! This module has NO dependencies on other stylable modules.

pub mod constants;
mod position;

pub use position::{LineIndex, Position, Span};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
