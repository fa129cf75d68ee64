//! Symbolic references between elements.
//!
//! A reference is written as text in the markup and bound to an element handle
//! only once the whole document has been read. Until then it stays
//! [`Reference::Pending`]; the resolver rewrites it in place to
//! [`Reference::Resolved`]. A reference never owns its target.

use crate::base::{ElementId, Name, VariableId};

/// What a reference points at; selects the lookup scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// `link.xconnector` → causal connector.
    Connector,
    /// `bind.role` → role declared inside the link's connector.
    Role,
    /// `descriptor.region`, `regionBase.region` → region.
    Region,
    /// `rule.var` → global variable.
    Variable,
    /// A node local to the referencing composite.
    Node,
    /// An anchor, property or port of the referenced node.
    Interface,
    /// A descriptor (global or local to a descriptor switch).
    Descriptor,
    /// `bindRule.rule` → rule or composite rule.
    Rule,
    /// `refer` → a same-kind node anywhere in the body.
    Reuse,
    /// `$role` in a link or bind parameter value → role bound by the link.
    Parameter,
    /// `$name` in a connector expression attribute → connector parameter.
    ConnectorParam,
}

impl RefKind {
    /// Prefix marking the reference in attribute text, if any.
    pub fn sigil(&self) -> Option<char> {
        match self {
            RefKind::Parameter | RefKind::ConnectorParam => Some('$'),
            _ => None,
        }
    }

    /// Human readable name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            RefKind::Connector => "connector",
            RefKind::Role => "role",
            RefKind::Region => "region",
            RefKind::Variable => "variable",
            RefKind::Node => "node",
            RefKind::Interface => "interface",
            RefKind::Descriptor => "descriptor",
            RefKind::Rule => "rule",
            RefKind::Reuse => "reused node",
            RefKind::Parameter => "parameter role",
            RefKind::ConnectorParam => "connector parameter",
        }
    }
}

/// A resolved reference target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Element(ElementId),
    Variable(VariableId),
}

/// A reference field: either the name as written or a handle to the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    /// Not yet resolved (or resolution failed): the name as written, without sigil.
    Pending { kind: RefKind, name: Name },
    /// Bound to a target.
    Resolved { kind: RefKind, target: Target },
}

impl Reference {
    pub fn pending(kind: RefKind, name: impl Into<Name>) -> Self {
        Self::Pending {
            kind,
            name: name.into(),
        }
    }

    /// Parse attribute text into a reference of `kind`.
    ///
    /// Sigil kinds only take values carrying the sigil; for those kinds a value
    /// without it is plain text and `None` is returned.
    pub fn parse(kind: RefKind, text: &str) -> Option<Self> {
        match kind.sigil() {
            Some(sigil) => text
                .strip_prefix(sigil)
                .filter(|name| !name.is_empty())
                .map(|name| Self::pending(kind, name)),
            None => Some(Self::pending(kind, text)),
        }
    }

    pub fn kind(&self) -> RefKind {
        match self {
            Reference::Pending { kind, .. } | Reference::Resolved { kind, .. } => *kind,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Resolved { .. })
    }

    /// The name still waiting for resolution.
    pub fn pending_name(&self) -> Option<&str> {
        match self {
            Reference::Pending { name, .. } => Some(name),
            Reference::Resolved { .. } => None,
        }
    }

    pub fn target(&self) -> Option<Target> {
        match self {
            Reference::Resolved { target, .. } => Some(*target),
            Reference::Pending { .. } => None,
        }
    }

    /// The resolved element, if the target is an element.
    pub fn element(&self) -> Option<ElementId> {
        match self.target()? {
            Target::Element(id) => Some(id),
            Target::Variable(_) => None,
        }
    }

    /// The resolved variable, if the target is a variable.
    pub fn variable(&self) -> Option<VariableId> {
        match self.target()? {
            Target::Variable(id) => Some(id),
            Target::Element(_) => None,
        }
    }
}

/// An attribute value: plain text or a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    Text(Name),
    Ref(Reference),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            AttrValue::Ref(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            AttrValue::Ref(reference) => Some(reference),
            AttrValue::Text(_) => None,
        }
    }
}
