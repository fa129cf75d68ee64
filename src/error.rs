//! Error types for hard failures.
//!
//! Only a few conditions stop an operation: an identifier that violates the
//! grammar, an absent value for a required structural field, and misuse of the
//! editing or event APIs. Everything else is a [`Diagnostic`](crate::base::Diagnostic)
//! recorded on an element.

use thiserror::Error;

use crate::base::{ElementId, Name};
use crate::model::ElementKind;

/// Errors raised by the tree editing API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The value does not match `[_:A-Za-z][-._:A-Za-z0-9]*`.
    #[error("invalid identifier: '{value}'")]
    InvalidIdentifier { value: String },

    /// A required structural attribute was given an absent value.
    #[error("{kind:?} requires attribute '{attribute}'")]
    RequiredAttribute {
        kind: ElementKind,
        attribute: &'static str,
    },

    /// A typed attribute was given a value outside its vocabulary.
    #[error("invalid value for '{attribute}': '{value}'")]
    InvalidValue { attribute: &'static str, value: String },

    /// The parent's schema does not accept this kind of child.
    #[error("{parent:?} cannot contain {child:?}")]
    InvalidChild {
        parent: ElementKind,
        child: ElementKind,
    },

    /// The kind carries no identifier.
    #[error("{kind:?} has no identifier")]
    NotIdentifiable { kind: ElementKind },

    /// The element already has a parent.
    #[error("element {0} is already attached")]
    Attached(ElementId),

    /// Attaching would make an element its own ancestor.
    #[error("attaching {0} would create a cycle")]
    Cycle(ElementId),

    /// The handle does not belong to this document.
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
}

impl ModelError {
    /// Create an invalid identifier error.
    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
        }
    }
}

/// Errors raised while consuming the structural event stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A hard model failure (identifier grammar) while constructing an element.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The close event names a different element than the one open.
    #[error("unbalanced close: expected </{expected}>, found </{found}>")]
    UnbalancedClose { expected: Name, found: Name },

    /// A close event arrived with nothing open.
    #[error("unexpected close </{found}> with no open element")]
    UnexpectedClose { found: Name },

    /// The document ended with elements still open.
    #[error("document ended with {count} unclosed element(s)")]
    UnclosedElements { count: usize },

    /// A top-level element other than the single `<ncl>` root.
    #[error("unexpected top-level element <{found}>")]
    UnexpectedRoot { found: Name },

    /// The document ended before its root element was seen.
    #[error("document ended without a root <ncl> element")]
    MissingRoot,
}
