//! Diagnostics — structured warnings and errors keyed to CSS node positions.
//!
//! Every other layer reports through a [`Diagnostics`] collector instead of
//! failing: the processor records analyze-level problems on the [`Meta`],
//! the transformer records resolve/transform-level problems on its result.
//!
//! Message texts come from [`messages`] and are part of the public contract.
//!
//! [`Meta`]: crate::processor::Meta

pub mod messages;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::Span;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The stylesheet the diagnostic belongs to.
    pub file: PathBuf,
    /// Location of the offending node, when it came from source.
    pub span: Option<Span>,
    /// Severity level.
    pub severity: Severity,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// The specific word inside the node the diagnostic refers to.
    pub word: Option<Arc<str>>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(file: &Path, span: Option<Span>, message: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.to_path_buf(),
            span,
            severity: Severity::Error,
            message: message.into(),
            word: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(file: &Path, span: Option<Span>, message: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.to_path_buf(),
            span,
            severity: Severity::Warning,
            message: message.into(),
            word: None,
        }
    }

    /// Create a new informational diagnostic.
    pub fn info(file: &Path, span: Option<Span>, message: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.to_path_buf(),
            span,
            severity: Severity::Info,
            message: message.into(),
            word: None,
        }
    }

    /// Set the span of the diagnostic.
    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    /// Point the diagnostic at a word inside the node.
    pub fn with_word(mut self, word: impl Into<Arc<str>>) -> Self {
        self.word = Some(word.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.span {
            Some(span) => write!(
                f,
                "{}:{} {}: {}",
                self.file.display(),
                span.start,
                self.severity.as_str(),
                self.message
            ),
            None => write!(
                f,
                "{} {}: {}",
                self.file.display(),
                self.severity.as_str(),
                self.message
            ),
        }
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during processing and transformation.
///
/// Identical reports (same file, span, severity and message) are kept once.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Add an error at a node.
    pub fn error(&mut self, file: &Path, span: Option<Span>, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::error(file, span, message));
    }

    /// Add a warning at a node.
    pub fn warning(&mut self, file: &Path, span: Option<Span>, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::warning(file, span, message));
    }

    /// Append every diagnostic of another collector.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in other {
            self.add(diagnostic);
        }
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Whether any diagnostic carries exactly this message.
    pub fn contains_message(&self, message: &str) -> bool {
        self.diagnostics.iter().any(|d| d.message.as_ref() == message)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Clear all diagnostics.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_counts_by_severity() {
        let file = Path::new("/a.st.css");
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(file, None, "first");
        diagnostics.warning(file, None, "second");
        diagnostics.warning(file, None, "third");

        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 2);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_collector_drops_identical_reports() {
        let file = Path::new("/a.st.css");
        let span = Some(Span::from_coords(0, 0, 0, 4));
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(file, span, "same");
        diagnostics.error(file, span, "same");
        diagnostics.error(file, None, "same");

        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_display_includes_one_based_position() {
        let diagnostic = Diagnostic::warning(
            Path::new("/a.st.css"),
            Some(Span::from_coords(2, 4, 2, 9)),
            "unknown var \"x\"",
        );
        assert_eq!(
            diagnostic.to_string(),
            "/a.st.css:3:5 warning: unknown var \"x\""
        );
    }

    #[test]
    fn test_take_empties_collector() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(Path::new("/a.st.css"), None, "x");
        let taken = diagnostics.take();
        assert_eq!(taken.len(), 1);
        assert!(diagnostics.is_empty());
    }
}
