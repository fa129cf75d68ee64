//! # ncl-model
//!
//! Document model for NCL hypermedia documents: a typed element tree built
//! incrementally from structural events, with deferred resolution of the
//! symbolic references between elements.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange → quick-xml reader/writer (feature "interchange")
//!   ↓
//! validate    → Structural and referential checks
//!   ↓
//! resolve     → Phased reference resolution, one scope per reference kind
//!   ↓
//! builder     → Open/close/end events → element tree
//!   ↓
//! model       → Element arena, child collections, schema table, references
//!   ↓
//! base        → Primitives (ElementId, Name, Diagnostic, BuildOptions)
//! ```
//!
//! ## Usage
//!
//! ```
//! use ncl::{Builder, MarkupEvent};
//!
//! let events = vec![
//!     MarkupEvent::opened("ncl", [("id", "hello")]),
//!     MarkupEvent::opened("body", []),
//!     MarkupEvent::opened("media", [("id", "video"), ("src", "video.mp4")]),
//!     MarkupEvent::closed("media"),
//!     MarkupEvent::closed("body"),
//!     MarkupEvent::closed("ncl"),
//!     MarkupEvent::Ended,
//! ];
//!
//! let mut doc = Builder::new().build(events).unwrap();
//! assert!(doc.warnings().is_empty());
//! assert!(doc.validate());
//! ```

// ============================================================================
// MODULES (dependency order: base → model → builder → resolve → validate)
// ============================================================================

/// Foundation types: ElementId, Name, diagnostics, options
pub mod base;

/// Hard failure types
pub mod error;

/// Element tree: arena, collections, schema, references
pub mod model;

/// Incremental builder over structural events
pub mod builder;

/// Symbolic reference resolution
pub mod resolve;

/// Well-formedness checks
pub mod validate;

/// Markup interchange over quick-xml
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{BuildOptions, Diagnostic, ElementId, Messages, Name, Severity, VariableId};

pub use builder::Builder;
pub use error::{BuildError, ModelError};
pub use model::{
    AttrValue, ChildSlot, Document, Element, ElementKind, Insertion, MarkupEvent, RefKind,
    Reference, Target,
};
pub use resolve::{ResolveStats, Resolver};
pub use validate::Validator;
