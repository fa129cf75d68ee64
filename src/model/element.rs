//! A single node of the document tree.

use indexmap::IndexMap;

use super::collection::ElementCollection;
use super::kind::{ElementKind, ElementSchema};
use super::reference::{AttrValue, Reference};
use super::vocab::{ActionOperator, Comparator, Operator};
use crate::base::{Diagnostic, ElementId, Messages, Name};

/// An element of the document tree.
///
/// Elements are owned by their [`Document`](super::Document)'s arena and
/// addressed by [`ElementId`]. `parent` and `children` are the ownership
/// edges; references stored in attributes are not.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) id: Option<Name>,
    pub(crate) parent: Option<ElementId>,
    /// Non-identity attributes in source order.
    pub(crate) attributes: IndexMap<Name, AttrValue>,
    pub(crate) children: ElementCollection,
    /// Messages recorded on this element.
    pub(crate) messages: Messages,
    /// This element's messages plus every descendant's, filled at document end.
    pub(crate) gathered: Messages,
}

impl Element {
    pub(crate) fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            parent: None,
            attributes: IndexMap::new(),
            children: ElementCollection::new(),
            messages: Messages::new(),
            gathered: Messages::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn schema(&self) -> &'static ElementSchema {
        self.kind.schema()
    }

    /// Identifier (`id`, or `name` for named kinds).
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &ElementCollection {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Text value of a plain attribute.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_text)
    }

    /// Reference stored under a reference attribute.
    pub fn reference(&self, name: &str) -> Option<&Reference> {
        self.attributes.get(name).and_then(AttrValue::as_reference)
    }

    /// Non-identity attributes in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reference attributes in source order.
    pub fn references(&self) -> impl Iterator<Item = (&str, &Reference)> {
        self.attributes
            .iter()
            .filter_map(|(k, v)| v.as_reference().map(|r| (k.as_str(), r)))
    }

    /// Returns true if the attribute is present, as text or reference.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Role declared by a connector expression leaf.
    pub fn role_name(&self) -> Option<&str> {
        if self.kind.declares_role() {
            self.text("role")
        } else {
            None
        }
    }

    /// Boolean operator of a compound condition, statement or composite rule.
    pub fn operator(&self) -> Option<Operator> {
        self.text("operator").and_then(Operator::parse)
    }

    /// Scheduling operator of a compound action.
    pub fn action_operator(&self) -> Option<ActionOperator> {
        self.text("operator").and_then(ActionOperator::parse)
    }

    pub fn comparator(&self) -> Option<Comparator> {
        self.text("comparator").and_then(Comparator::parse)
    }

    /// Warnings recorded on this element.
    pub fn warnings(&self) -> &[Diagnostic] {
        self.messages.warnings()
    }

    /// Errors recorded on this element.
    pub fn errors(&self) -> &[Diagnostic] {
        self.messages.errors()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Messages of the whole subtree rooted here, as gathered at document end.
    pub fn gathered(&self) -> &Messages {
        &self.gathered
    }

    pub fn has_errors(&self) -> bool {
        self.messages.has_errors()
    }
}
