//! Diagnostics: structured error reporting for the host.
//!
//! Every failure in parsing or merging ends up here as a [`Diagnostic`]
//! with a stable code, so the host can surface it as a build error or
//! warning at the originating document.

use std::fmt;
use std::sync::Arc;

use crate::base::Location;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable code (e.g., "CVSSG003").
    pub code: &'static str,
    pub severity: Severity,
    pub message: Arc<str>,
    pub location: Location,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: &'static str, location: Location, message: impl Into<Arc<str>>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: &'static str, location: Location, message: impl Into<Arc<str>>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location,
            self.severity.as_str(),
            self.code,
            self.message
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable diagnostic codes reported to the host.
pub mod codes {
    /// No namespace could be resolved for a document.
    pub const NO_NAMESPACE: &str = "CVSSG001";
    /// The manifest is malformed, has an unsupported version or lacks a required field.
    pub const INVALID_MANIFEST_FILE: &str = "CVSSG002";
    /// The command table is malformed or declares an invalid GUID/ID literal.
    pub const INVALID_COMMAND_TABLE_FILE: &str = "CVSSG003";
    /// A symbol was re-declared with a different value, or two documents
    /// produce the same generated file name in one namespace.
    pub const DUPLICATE_SYMBOL: &str = "CVSSG004";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during generation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// A document has no namespace to generate into.
    pub fn no_namespace(&mut self, location: Location, file_name: &str) {
        self.add(Diagnostic::error(
            codes::NO_NAMESPACE,
            location,
            format!(
                "could not determine the namespace for '{file_name}'; set the RootNamespace \
                 property or the Namespace metadata of the file"
            ),
        ));
    }

    pub fn invalid_manifest(&mut self, location: Location, reason: &str) {
        self.add(Diagnostic::error(
            codes::INVALID_MANIFEST_FILE,
            location,
            format!("the VSIX manifest is invalid: {reason}"),
        ));
    }

    pub fn invalid_command_table(&mut self, location: Location, path: &str, reason: &str) {
        self.add(Diagnostic::error(
            codes::INVALID_COMMAND_TABLE_FILE,
            location,
            format!("the command table '{path}' is invalid: {reason}"),
        ));
    }

    /// A symbol was declared again with a different value; the first value is kept.
    pub fn duplicate_symbol(&mut self, location: Location, name: &str) {
        self.add(Diagnostic::warning(
            codes::DUPLICATE_SYMBOL,
            location,
            format!(
                "the symbol '{name}' is already defined with a different value; \
                 the first definition is used"
            ),
        ));
    }

    /// A generated file name is already taken in the namespace; the earlier file is kept.
    pub fn duplicate_artifact(&mut self, location: Location, namespace: &str, name: &str) {
        self.add(Diagnostic::warning(
            codes::DUPLICATE_SYMBOL,
            location,
            format!(
                "the generated file '{name}' already exists in namespace '{namespace}'; \
                 the output of this document is skipped"
            ),
        ));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics reported against a specific document.
    pub fn diagnostics_for_path(&self, path: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.location.path.as_deref() == Some(path))
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn extend(&mut self, other: DiagnosticCollector) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
