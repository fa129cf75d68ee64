//! Lookup scopes, one per reference kind.
//!
//! Every function searches a fixed part of the tree in document order and
//! returns the first match. None of them mutate the document.

use rustc_hash::FxHashSet;

use crate::base::ElementId;
use crate::model::{ChildSlot, Document, ElementKind, RefKind, Reference, Target};

/// Outcome of one lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Lookup {
    Found(Target),
    Missing,
    /// A reference this one depends on (named by the attribute) is unresolved.
    Blocked(&'static str),
    /// The reuse chain starting at the target loops.
    Cyclic,
}

impl From<Option<ElementId>> for Lookup {
    fn from(found: Option<ElementId>) -> Self {
        found.map_or(Lookup::Missing, |id| Lookup::Found(Target::Element(id)))
    }
}

/// Look up `name` for the reference of `kind` held by `owner`.
///
/// Variables are not handled here: they are created on a miss, which needs
/// mutable access to the registry.
pub(super) fn lookup(doc: &Document, owner: ElementId, kind: RefKind, name: &str) -> Lookup {
    match kind {
        RefKind::Connector => connector(doc, name).into(),
        RefKind::Region => region(doc, owner, name).into(),
        RefKind::Reuse => reuse(doc, owner, name),
        RefKind::Node => node(doc, owner, name).into(),
        RefKind::Descriptor => descriptor(doc, owner, name).into(),
        RefKind::Rule => rule(doc, name).into(),
        RefKind::ConnectorParam => connector_param(doc, owner, name).into(),
        RefKind::Role => role(doc, owner, name),
        RefKind::Interface => interface(doc, owner, name),
        RefKind::Parameter => parameter(doc, owner, name),
        RefKind::Variable => Lookup::Missing,
    }
}

/// The head's base filed under `slot` (the first one for region bases).
fn base(doc: &Document, slot: ChildSlot) -> Option<ElementId> {
    let head = doc.head()?;
    doc.children_in(head, slot).next()
}

fn connector(doc: &Document, name: &str) -> Option<ElementId> {
    doc.find_child(base(doc, ChildSlot::ConnectorBase)?, ChildSlot::Connectors, name)
}

fn rule(doc: &Document, name: &str) -> Option<ElementId> {
    doc.find_child(base(doc, ChildSlot::RuleBase)?, ChildSlot::Rules, name)
}

/// Depth-first through every region base in head order. A region base
/// referring to a region never searches itself.
fn region(doc: &Document, owner: ElementId, name: &str) -> Option<ElementId> {
    let head = doc.head()?;
    doc.children_in(head, ChildSlot::RegionBases)
        .filter(|base| *base != owner)
        .find_map(|base| {
            doc.descendants(base).skip(1).find(|id| {
                let region = &doc[*id];
                region.kind() == ElementKind::Region && region.id() == Some(name)
            })
        })
}

fn descriptor(doc: &Document, owner: ElementId, name: &str) -> Option<ElementId> {
    let element = &doc[owner];
    let scope = match element.kind() {
        // Local to the enclosing descriptor switch.
        ElementKind::DescriptorBindRule | ElementKind::DefaultDescriptor => element.parent()?,
        _ => base(doc, ChildSlot::DescriptorBase)?,
    };
    doc.find_child(scope, ChildSlot::Descriptors, name)
}

fn node(doc: &Document, owner: ElementId, name: &str) -> Option<ElementId> {
    let element = &doc[owner];
    let parent = element.parent()?;
    match element.kind() {
        ElementKind::DefaultComponent | ElementKind::BindRule | ElementKind::Port => {
            doc.find_child(parent, ChildSlot::Nodes, name)
        }
        ElementKind::Mapping => {
            let switch = doc.enclosing(owner, &[ElementKind::Switch])?;
            doc.find_child(switch, ChildSlot::Nodes, name)
        }
        ElementKind::Bind => {
            let composite = doc[parent].parent()?;
            if doc[composite].id() == Some(name) {
                Some(composite)
            } else {
                doc.find_child(composite, ChildSlot::Nodes, name)
            }
        }
        _ => None,
    }
}

fn connector_param(doc: &Document, owner: ElementId, name: &str) -> Option<ElementId> {
    let connector = doc.enclosing(owner, &[ElementKind::CausalConnector])?;
    doc.find_child(connector, ChildSlot::Params, name)
}

/// First node of the owner's kind with identifier `name`, searching the body
/// and every context and switch below it.
pub(super) fn find_reusable(doc: &Document, kind: ElementKind, name: &str) -> Option<ElementId> {
    let body = doc.body()?;
    let mut stack = Vec::new();
    push_nodes(doc, body, &mut stack);

    while let Some(id) = stack.pop() {
        let element = &doc[id];
        if element.kind() == kind && element.id() == Some(name) {
            return Some(id);
        }
        if matches!(element.kind(), ElementKind::Context | ElementKind::Switch) {
            push_nodes(doc, id, &mut stack);
        }
    }
    None
}

fn push_nodes(doc: &Document, parent: ElementId, stack: &mut Vec<ElementId>) {
    let nodes: Vec<ElementId> = doc.children_in(parent, ChildSlot::Nodes).collect();
    stack.extend(nodes.into_iter().rev());
}

/// Reuse target, rejected when following `refer` from it comes back to a
/// node already seen. The owner and its ancestors count as seen: reusing
/// an enclosing node would include it inside itself.
fn reuse(doc: &Document, owner: ElementId, name: &str) -> Lookup {
    let kind = doc[owner].kind();
    let Some(target) = find_reusable(doc, kind, name) else {
        return Lookup::Missing;
    };

    let mut visited: FxHashSet<ElementId> = doc.ancestors(owner).collect();
    visited.insert(owner);
    let mut current = target;
    loop {
        if !visited.insert(current) {
            return Lookup::Cyclic;
        }
        let next = match doc[current].reference("refer") {
            Some(Reference::Resolved {
                target: Target::Element(next),
                ..
            }) => Some(*next),
            Some(Reference::Pending { name, .. }) => find_reusable(doc, kind, name),
            _ => None,
        };
        match next {
            Some(next) => current = next,
            None => break,
        }
    }
    Lookup::Found(Target::Element(target))
}

/// Role leaf inside the owning link's connector, depth-first.
fn role(doc: &Document, owner: ElementId, name: &str) -> Lookup {
    let Some(link) = doc[owner].parent() else {
        return Lookup::Missing;
    };
    let Some(connector) = doc[link].reference("xconnector").and_then(Reference::element) else {
        return Lookup::Blocked("xconnector");
    };
    doc.descendants(connector)
        .find(|id| doc[*id].role_name() == Some(name))
        .into()
}

/// Anchor, property or port of the owner's resolved component.
fn interface(doc: &Document, owner: ElementId, name: &str) -> Lookup {
    let Some(component) = doc[owner].reference("component").and_then(Reference::element) else {
        return Lookup::Blocked("component");
    };
    let slots: &[ChildSlot] = match doc[component].kind() {
        ElementKind::Media => &[ChildSlot::Areas, ChildSlot::Properties],
        ElementKind::Context | ElementKind::Body => &[ChildSlot::Ports, ChildSlot::Properties],
        ElementKind::Switch => &[ChildSlot::Ports],
        _ => &[],
    };
    slots
        .iter()
        .find_map(|slot| doc.find_child(component, *slot, name))
        .into()
}

/// Role bound by one of the enclosing link's binds.
fn parameter(doc: &Document, owner: ElementId, name: &str) -> Lookup {
    let Some(link) = doc.enclosing(owner, &[ElementKind::Link]) else {
        return Lookup::Missing;
    };
    for bind in doc.children_in(link, ChildSlot::Binds) {
        let Some(role) = doc[bind].reference("role") else {
            continue;
        };
        if doc.reference_text(role).as_deref() == Some(name) {
            return match role.element() {
                Some(role) => Lookup::Found(Target::Element(role)),
                None => Lookup::Blocked("role"),
            };
        }
    }
    Lookup::Missing
}
