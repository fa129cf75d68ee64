//! The NCL element tree.
//!
//! - [`Document`] - element arena, editing API, diagnostics gathering
//! - [`Element`] - one node with its attributes, children and messages
//! - [`ElementCollection`] - ordered children with replace-on-equal insertion
//! - [`ElementKind`] / [`ElementSchema`] - the table driving construction
//! - [`Reference`] - pending or resolved symbolic references
//! - [`VariableRegistry`] - the document's global variables
//! - [`MarkupEvent`] - structural events in and out of the tree

mod collection;
mod document;
mod element;
mod emit;
mod event;
mod kind;
mod reference;
mod variable;
mod vocab;

pub use collection::{ElementCollection, EntryKey, Insertion};
pub use document::{Descendants, Document};
pub use element::Element;
pub use event::MarkupEvent;
pub use kind::{ChildSlot, ElementKind, ElementSchema, Equivalence, Identity};
pub use reference::{AttrValue, RefKind, Reference, Target};
pub use variable::VariableRegistry;
pub use vocab::{ActionOperator, Comparator, Operator, Vocabulary};
