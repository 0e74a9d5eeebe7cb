//! # stylable-core
//!
//! Core library for the Stylable CSS superset: single-file processing,
//! cross-file symbol resolution and transformation to namespaced plain CSS.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! stylable     → Facade: Stylable, StylableConfig
//!   ↓
//! transformer  → Selector scoping, states, value inlining, mixins, exports
//!   ↓
//! resolver     → Imports, aliases and extends chains across stylesheets
//!   ↓
//! project      → File system, request resolution, memoizing FileProcessor
//!   ↓
//! processor    → Single-file Meta extraction
//!   ↓
//! css, selector, value → Logos lexers, parsers and printers
//!   ↓
//! diagnostics  → Diagnostic collector and message catalog
//!   ↓
//! base         → Positions, spans, constants
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → processor → resolver → transformer)
// ============================================================================

/// Foundation types: Span, Position, LineIndex, constants
pub mod base;

/// Diagnostics: collector and stable message catalog
pub mod diagnostics;

/// Stylesheet syntax tree, lexer and parser
pub mod css;

/// Selector syntax
pub mod selector;

/// Declaration value syntax
pub mod value;

/// Single-file symbol extraction
pub mod processor;

/// File access, request resolution and the processor cache
pub mod project;

/// JS mixin and formatter interface
pub mod js;

/// Cross-file resolution
pub mod resolver;

/// Compilation to plain CSS
pub mod transformer;

/// Fatal errors
pub mod error;

mod config;
mod stylable;

// Re-export the compiler surface
pub use config::StylableConfig;
pub use error::{Result, StylableError};
pub use stylable::Stylable;
pub use transformer::{StylableExports, StylableResults, Transformer};

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use processor::{Meta, Processor};
pub use resolver::Resolver;
