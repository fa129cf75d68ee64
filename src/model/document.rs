//! The document arena and its editing API.
//!
//! A [`Document`] owns every element it ever created in a flat `Vec`. Handles
//! ([`ElementId`]) index into it and stay valid for the document's lifetime:
//! detaching or replacing an element only unlinks it from its parent, it
//! never moves or frees the slot. Only elements reachable from the root take
//! part in resolution, validation and re-emission.

use std::ops::Index;

use smol_str::format_smolstr;
use tracing::trace;

use super::collection::{EntryKey, Insertion};
use super::element::Element;
use super::kind::{ChildSlot, ElementKind, Equivalence, Identity};
use super::reference::{AttrValue, RefKind, Reference, Target};
use super::variable::VariableRegistry;
use super::vocab::{ActionOperator, Comparator, Operator, Vocabulary};
use crate::base::{Diagnostic, ElementId, Messages, Name, is_valid_identifier};
use crate::error::ModelError;

/// An NCL document: the element arena, its root and the global variables.
#[derive(Clone, Debug)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    variables: VariableRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only its root `ncl` element.
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new(ElementKind::Document)],
            root: ElementId::new(0),
            variables: VariableRegistry::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    fn element(&self, id: ElementId) -> Result<&Element, ModelError> {
        self.get(id).ok_or(ModelError::UnknownElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, ModelError> {
        self.get_mut(id).ok_or(ModelError::UnknownElement(id))
    }

    /// Number of elements in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn head(&self) -> Option<ElementId> {
        self[self.root].children.in_slot(ChildSlot::Head).next()
    }

    pub fn body(&self) -> Option<ElementId> {
        self[self.root].children.in_slot(ChildSlot::Body).next()
    }

    /// The global variable registry.
    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }

    pub(crate) fn variables_mut(&mut self) -> &mut VariableRegistry {
        &mut self.variables
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Create a detached element of `kind`.
    pub fn create(&mut self, kind: ElementKind) -> ElementId {
        let id = ElementId::new(self.elements.len());
        self.elements.push(Element::new(kind));
        id
    }

    /// Attach a detached element as the last child of `parent`.
    ///
    /// An existing child equal to `child` is evicted and loses its parent link.
    pub fn attach(&mut self, parent: ElementId, child: ElementId) -> Result<Insertion, ModelError> {
        let parent_kind = self.element(parent)?.kind;
        let child_element = self.element(child)?;
        if child_element.parent.is_some() {
            return Err(ModelError::Attached(child));
        }
        if !parent_kind.accepts(child_element.kind) {
            return Err(ModelError::InvalidChild {
                parent: parent_kind,
                child: child_element.kind,
            });
        }
        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(ModelError::Cycle(child));
        }

        let key = self.entry_key(child).ok_or(ModelError::UnknownElement(child))?;
        let outcome = self.elements[parent.index()].children.insert(key, child);
        self.elements[child.index()].parent = Some(parent);
        if let Insertion::Replaced(evicted) = outcome {
            trace!(%parent, %child, %evicted, "replaced equal child");
            self.elements[evicted.index()].parent = None;
        }
        Ok(outcome)
    }

    /// Unlink `child` from its parent. Returns the former parent.
    pub fn detach(&mut self, child: ElementId) -> Option<ElementId> {
        let parent = self.get(child)?.parent?;
        self.elements[parent.index()].children.remove(child);
        self.elements[child.index()].parent = None;
        Some(parent)
    }

    /// Remove `child` from `parent`. Returns false if it was not a child.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.has_child(parent, child) {
            return false;
        }
        self.detach(child).is_some()
    }

    pub fn has_child(&self, parent: ElementId, child: ElementId) -> bool {
        self.get(parent)
            .is_some_and(|element| element.children.contains(child))
    }

    /// Look up an identifiable child by identifier.
    pub fn find_child(&self, parent: ElementId, slot: ChildSlot, id: &str) -> Option<ElementId> {
        self.get(parent)?.children.get(slot, id)
    }

    /// Children of `parent` in insertion order.
    ///
    /// An unknown handle has no children.
    pub fn children(&self, parent: ElementId) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.get(parent)
            .into_iter()
            .flat_map(|element| element.children.iter())
    }

    /// Children of `parent` filed under `slot`.
    pub fn children_in(&self, parent: ElementId, slot: ChildSlot) -> impl Iterator<Item = ElementId> + '_ {
        self.get(parent)
            .into_iter()
            .flat_map(move |element| element.children.in_slot(slot))
    }

    /// `from` and all its descendants in document order.
    pub fn descendants(&self, from: ElementId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: vec![from],
        }
    }

    /// Proper ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.get(id).and_then(Element::parent), |current| {
            self.get(*current).and_then(Element::parent)
        })
    }

    /// Nearest ancestor of one of `kinds`.
    pub fn enclosing(&self, id: ElementId, kinds: &[ElementKind]) -> Option<ElementId> {
        self.ancestors(id)
            .find(|ancestor| kinds.contains(&self[*ancestor].kind))
    }

    /// Whether `id` is the root or hangs below it.
    pub fn is_reachable(&self, id: ElementId) -> bool {
        id == self.root || self.ancestors(id).any(|ancestor| ancestor == self.root)
    }

    /// The collection key `id` is (or would be) stored under in its parent.
    pub fn entry_key(&self, id: ElementId) -> Option<EntryKey> {
        let element = self.get(id)?;
        let schema = element.schema();
        let slot = schema.slot;
        let key = match schema.equivalence {
            Equivalence::Identifier => match &element.id {
                Some(name) => EntryKey::Identified {
                    slot,
                    id: name.clone(),
                },
                None => EntryKey::Distinct { slot, element: id },
            },
            Equivalence::Singleton => EntryKey::Equivalent {
                slot,
                key: Name::default(),
            },
            Equivalence::Attributes(attributes) => {
                let mut key = String::new();
                for (i, attribute) in attributes.iter().enumerate() {
                    if i > 0 {
                        key.push('\u{1f}');
                    }
                    if let Some(text) = self.attribute_text(id, attribute) {
                        key.push_str(&text);
                    }
                }
                EntryKey::Equivalent {
                    slot,
                    key: Name::from(key),
                }
            }
            Equivalence::Never => EntryKey::Distinct { slot, element: id },
        };
        Some(key)
    }

    /// Recompute the key of an attached element after an edit.
    fn refile(&mut self, id: ElementId) {
        let (Some(parent), Some(key)) = (self.get(id).and_then(Element::parent), self.entry_key(id)) else {
            return;
        };
        if let Some(Insertion::Replaced(evicted)) = self.elements[parent.index()].children.rekey(id, key) {
            trace!(%parent, element = %id, %evicted, "edit made children equal");
            self.elements[evicted.index()].parent = None;
        }
    }

    // ------------------------------------------------------------------
    // Identifiers and attributes
    // ------------------------------------------------------------------

    /// Assign the element's identifier.
    ///
    /// Fails without touching the element when `value` violates the
    /// identifier grammar.
    pub fn set_id(&mut self, id: ElementId, value: &str) -> Result<(), ModelError> {
        let kind = self.element(id)?.kind;
        if kind.schema().identity == Identity::None {
            return Err(ModelError::NotIdentifiable { kind });
        }
        if !is_valid_identifier(value) {
            return Err(ModelError::invalid_identifier(value));
        }
        self.elements[id.index()].id = Some(Name::new(value));
        self.refile(id);
        Ok(())
    }

    /// Drop the identifier of an element whose identity is optional.
    pub fn clear_id(&mut self, id: ElementId) -> Result<(), ModelError> {
        let kind = self.element(id)?.kind;
        let identity = kind.schema().identity;
        if let (true, Some(attribute)) = (identity.is_required(), identity.attribute()) {
            return Err(ModelError::RequiredAttribute { kind, attribute });
        }
        self.elements[id.index()].id = None;
        self.refile(id);
        Ok(())
    }

    /// Assign an attribute from its markup text.
    ///
    /// The identity attribute goes through [`set_id`](Self::set_id), reference
    /// attributes become pending references and operator/comparator values
    /// are checked against their vocabulary.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> Result<(), ModelError> {
        let kind = self.element(id)?.kind;
        let schema = kind.schema();
        if schema.identity.attribute() == Some(name) {
            return self.set_id(id, value);
        }
        if value.is_empty() {
            if let Some(attribute) = schema.required.iter().find(|required| **required == name) {
                return Err(ModelError::RequiredAttribute { kind, attribute: *attribute });
            }
        }
        if let Some(vocabulary) = Vocabulary::of(kind, name) {
            if !vocabulary.accepts(value) {
                return Err(ModelError::InvalidValue {
                    attribute: vocabulary.attribute(),
                    value: value.to_string(),
                });
            }
        }
        self.store_attribute(id, name, value);
        self.refile(id);
        Ok(())
    }

    /// Store an attribute without checks; used while reading markup.
    pub(crate) fn store_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let kind = self[id].kind;
        let stored = match kind.reference_kind(name) {
            Some(ref_kind) => match Reference::parse(ref_kind, value) {
                Some(reference) => AttrValue::Ref(reference),
                None => AttrValue::Text(Name::new(value)),
            },
            None if kind.is_connector_expression() && name != "role" => {
                match Reference::parse(RefKind::ConnectorParam, value) {
                    Some(reference) => AttrValue::Ref(reference),
                    None => AttrValue::Text(Name::new(value)),
                }
            }
            None => AttrValue::Text(Name::new(value)),
        };
        self.elements[id.index()]
            .attributes
            .insert(Name::new(name), stored);
    }

    /// Remove a non-identity attribute. Required attributes cannot be removed.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Result<Option<AttrValue>, ModelError> {
        let kind = self.element(id)?.kind;
        let schema = kind.schema();
        if schema.identity.attribute() == Some(name) {
            let previous = self[id].id.clone();
            self.clear_id(id)?;
            return Ok(previous.map(AttrValue::Text));
        }
        if let Some(attribute) = schema.required.iter().find(|required| **required == name) {
            return Err(ModelError::RequiredAttribute { kind, attribute: *attribute });
        }
        let removed = self.element_mut(id)?.attributes.shift_remove(name);
        if removed.is_some() {
            self.refile(id);
        }
        Ok(removed)
    }

    /// Set or clear the operator of a compound condition, statement or composite rule.
    pub fn set_operator(&mut self, id: ElementId, operator: Option<Operator>) -> Result<(), ModelError> {
        self.set_typed(id, Vocabulary::Operator, operator.map(|op| op.as_str()))
    }

    /// Set or clear the operator of a compound action.
    pub fn set_action_operator(&mut self, id: ElementId, operator: Option<ActionOperator>) -> Result<(), ModelError> {
        self.set_typed(id, Vocabulary::ActionOperator, operator.map(|op| op.as_str()))
    }

    pub fn set_comparator(&mut self, id: ElementId, comparator: Option<Comparator>) -> Result<(), ModelError> {
        self.set_typed(id, Vocabulary::Comparator, comparator.map(|c| c.as_str()))
    }

    fn set_typed(&mut self, id: ElementId, vocabulary: Vocabulary, value: Option<&str>) -> Result<(), ModelError> {
        let kind = self.element(id)?.kind;
        let attribute = vocabulary.attribute();
        if Vocabulary::of(kind, attribute) != Some(vocabulary) {
            return Err(ModelError::InvalidValue {
                attribute,
                value: value.unwrap_or_default().to_string(),
            });
        }
        match value {
            Some(value) => self.set_attribute(id, attribute, value),
            None => self.remove_attribute(id, attribute).map(|_| ()),
        }
    }

    /// Text of an attribute as it would be written back to markup.
    pub fn attribute_text(&self, id: ElementId, name: &str) -> Option<Name> {
        let element = self.get(id)?;
        if element.schema().identity.attribute() == Some(name) {
            return element.id.clone();
        }
        match element.attributes.get(name)? {
            AttrValue::Text(text) => Some(text.clone()),
            AttrValue::Ref(reference) => self.reference_text(reference),
        }
    }

    /// The textual form of a reference.
    ///
    /// Pending references keep the name as written; resolved ones are
    /// re-derived from the target's identifier (or declared role).
    pub fn reference_text(&self, reference: &Reference) -> Option<Name> {
        let bare = match reference {
            Reference::Pending { name, .. } => name.clone(),
            Reference::Resolved {
                target: Target::Element(target),
                ..
            } => {
                let target = self.get(*target)?;
                match (target.id(), target.role_name()) {
                    (Some(id), _) => Name::new(id),
                    (None, Some(role)) => Name::new(role),
                    (None, None) => return None,
                }
            }
            Reference::Resolved {
                target: Target::Variable(variable),
                ..
            } => Name::new(self.variables.name(*variable)?),
        };
        Some(match reference.kind().sigil() {
            Some(sigil) => format_smolstr!("{sigil}{bare}"),
            None => bare,
        })
    }

    pub(crate) fn set_reference(&mut self, id: ElementId, name: &str, reference: Reference) {
        if let Some(slot) = self.elements[id.index()].attributes.get_mut(name) {
            *slot = AttrValue::Ref(reference);
        }
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Record a diagnostic on `id`.
    pub(crate) fn record(&mut self, id: ElementId, diagnostic: Diagnostic) {
        if let Some(element) = self.get_mut(id) {
            element.messages.push(diagnostic.with_element(id));
        }
    }

    /// Fold every element's messages into its ancestors, post-order.
    pub fn gather_diagnostics(&mut self) {
        let order: Vec<ElementId> = self.descendants(self.root).collect();
        for &id in order.iter().rev() {
            let element = &self.elements[id.index()];
            let mut gathered = element.messages.clone();
            for child in element.children.iter() {
                gathered.extend_from(&self.elements[child.index()].gathered);
            }
            self.elements[id.index()].gathered = gathered;
        }
    }

    /// Every message in the tree, as last gathered.
    pub fn diagnostics(&self) -> &Messages {
        &self[self.root].gathered
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        self.diagnostics().warnings()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        self.diagnostics().errors()
    }
}

impl Index<ElementId> for Document {
    type Output = Element;

    fn index(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }
}

/// Pre-order walk over a subtree; see [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let next = self.stack.pop()?;
        if let Some(element) = self.document.get(next) {
            self.stack.extend(element.children.iter().rev());
        }
        Some(next)
    }
}
