//! Diagnostics: soft failures recorded on elements.
//!
//! Nothing in the build → resolve → validate pipeline aborts on a broken
//! document. Problems become [`Diagnostic`] values attached to the element they
//! concern, split into two severities:
//!
//! - **errors**: the element or its subtree is structurally or referentially broken
//! - **warnings**: a resolution miss or a recoverable inconsistency

use std::sync::Arc;

use super::ElementId;

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

/// A diagnostic message bound to the element that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable code (see [`codes`]).
    pub code: &'static str,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Element the diagnostic was recorded on, once attached.
    pub element: Option<ElementId>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            element: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            element: None,
        }
    }

    /// Bind the diagnostic to an element.
    pub fn with_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity.as_str(), self.code, self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Structural and referential errors (builder, validator)
/// - **W0001-W0099**: Warnings (resolution misses, overrides)
pub mod codes {
    // ========================================================================
    // ERRORS (E0001-E0099)
    // ========================================================================

    /// A required attribute is absent.
    pub const MISSING_ATTRIBUTE: &str = "E0001";
    /// A composite that must have content is empty.
    pub const EMPTY_COMPOSITE: &str = "E0002";
    /// An attribute value is outside its vocabulary.
    pub const INVALID_VALUE: &str = "E0003";
    /// A reference the element cannot work without is unresolved.
    pub const UNRESOLVED_REQUIRED: &str = "E0004";
    /// Wrong number of children of some kind.
    pub const CARDINALITY: &str = "E0005";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// Reference target not found in its scope.
    pub const UNRESOLVED_REFERENCE: &str = "W0001";
    /// Reference skipped because the reference it depends on is unresolved.
    pub const UNRESOLVED_DEPENDENCY: &str = "W0002";
    /// Reuse (`refer`) chain loops back on itself.
    pub const CYCLIC_REUSE: &str = "W0003";
    /// A duplicate identifier replaced an earlier entry.
    pub const OVERRIDDEN: &str = "W0004";
    /// `$name` parameter value with no matching bind or connector parameter.
    pub const DANGLING_PARAMETER: &str = "W0005";
}

// ============================================================================
// MESSAGE LISTS
// ============================================================================

/// Warning and error lists held by an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Messages {
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the list matching its severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Append copies of another list's messages, warnings and errors separately.
    pub fn extend_from(&mut self, other: &Messages) {
        self.warnings.extend(other.warnings.iter().cloned());
        self.errors.extend(other.errors.iter().cloned());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len() + self.errors.len()
    }

    /// Iterate over errors first, then warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Keep only the messages matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&Diagnostic) -> bool) {
        self.warnings.retain(|d| keep(d));
        self.errors.retain(|d| keep(d));
    }

    pub fn clear(&mut self) {
        self.warnings.clear();
        self.errors.clear();
    }
}
