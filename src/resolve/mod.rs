//! Symbolic reference resolution.
//!
//! Runs once over a finished tree. Every pending reference reachable from the
//! root is looked up in the scope its kind dictates and rewritten in place
//! to a handle. A miss never aborts the pass: the referencing element gets a
//! warning and its reference stays pending.
//!
//! References are processed in three phases so that a lookup never depends
//! on a reference that has not had its chance yet:
//!
//! 1. independent kinds (connector, region, variable, reuse, node,
//!    descriptor, rule, connector parameter)
//! 2. kinds reading a phase 1 result on the same element or its link (role,
//!    interface)
//! 3. `$role` parameters, which read phase 2 roles

mod scope;

use tracing::{debug, trace};

use crate::base::{Diagnostic, ElementId, Name, codes};
use crate::model::{Document, RefKind, Reference, Target};
use scope::Lookup;

/// Resolution phase of a reference kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Independent,
    Dependent,
    Parameters,
}

impl Phase {
    /// Every phase, in execution order.
    pub const ORDER: [Phase; 3] = [Phase::Independent, Phase::Dependent, Phase::Parameters];

    pub fn of(kind: RefKind) -> Phase {
        match kind {
            RefKind::Role | RefKind::Interface => Phase::Dependent,
            RefKind::Parameter => Phase::Parameters,
            RefKind::Connector
            | RefKind::Region
            | RefKind::Variable
            | RefKind::Reuse
            | RefKind::Node
            | RefKind::Descriptor
            | RefKind::Rule
            | RefKind::ConnectorParam => Phase::Independent,
        }
    }
}

/// Counts from one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub resolved: usize,
    /// Plain misses (`W0001`).
    pub unresolved: usize,
    /// Skipped because a prerequisite was unresolved (`W0002`).
    pub blocked: usize,
    /// Reuse chains that loop (`W0003`).
    pub cyclic: usize,
    /// `$` parameters with nothing to bind to (`W0005`).
    pub dangling: usize,
}

impl ResolveStats {
    /// References left pending.
    pub fn failed(&self) -> usize {
        self.unresolved + self.blocked + self.cyclic + self.dangling
    }
}

/// A pending reference found in the tree.
#[derive(Debug)]
struct PendingRef {
    owner: ElementId,
    attribute: Name,
    kind: RefKind,
    name: Name,
}

/// Binds pending references to their targets.
#[derive(Debug, Default)]
pub struct Resolver;

impl Resolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every pending reference reachable from the root.
    pub fn resolve(&self, doc: &mut Document) -> ResolveStats {
        let pending = collect_pending(doc);
        debug!(pending = pending.len(), "resolving references");

        let mut stats = ResolveStats::default();
        for phase in Phase::ORDER {
            let before = stats;
            for reference in pending.iter().filter(|r| Phase::of(r.kind) == phase) {
                self.resolve_one(doc, reference, &mut stats);
            }
            debug!(
                ?phase,
                resolved = stats.resolved - before.resolved,
                failed = stats.failed() - before.failed(),
                "phase done"
            );
        }

        debug!(
            resolved = stats.resolved,
            unresolved = stats.unresolved,
            blocked = stats.blocked,
            cyclic = stats.cyclic,
            dangling = stats.dangling,
            variables = doc.variables().len(),
            "resolution finished"
        );
        stats
    }

    fn resolve_one(&self, doc: &mut Document, pending: &PendingRef, stats: &mut ResolveStats) {
        let PendingRef {
            owner,
            attribute,
            kind,
            name,
        } = pending;
        let (owner, kind) = (*owner, *kind);

        let lookup = match kind {
            RefKind::Variable => Lookup::Found(Target::Variable(doc.variables_mut().get_or_insert(name))),
            _ => scope::lookup(doc, owner, kind, name),
        };

        let diagnostic = match lookup {
            Lookup::Found(target) => {
                trace!(%owner, %attribute, %name, ?target, "resolved");
                doc.set_reference(owner, attribute, Reference::Resolved { kind, target });
                stats.resolved += 1;
                return;
            }
            Lookup::Missing if kind.sigil().is_some() => {
                stats.dangling += 1;
                Diagnostic::warning(
                    codes::DANGLING_PARAMETER,
                    format!("no {} '${name}' to bind to", kind.describe()),
                )
            }
            Lookup::Missing => {
                stats.unresolved += 1;
                Diagnostic::warning(
                    codes::UNRESOLVED_REFERENCE,
                    format!("unresolved {} '{name}' in '{attribute}'", kind.describe()),
                )
            }
            Lookup::Blocked(prerequisite) => {
                stats.blocked += 1;
                Diagnostic::warning(
                    codes::UNRESOLVED_DEPENDENCY,
                    format!(
                        "{} '{name}' not looked up: '{prerequisite}' is unresolved",
                        kind.describe()
                    ),
                )
            }
            Lookup::Cyclic => {
                stats.cyclic += 1;
                Diagnostic::warning(
                    codes::CYCLIC_REUSE,
                    format!("reuse of '{name}' forms a cycle"),
                )
            }
        };
        trace!(%owner, %attribute, %name, code = diagnostic.code, "not resolved");
        doc.record(owner, diagnostic);
    }
}

/// Pending references reachable from the root, in document order.
fn collect_pending(doc: &Document) -> Vec<PendingRef> {
    let mut pending = Vec::new();
    for owner in doc.descendants(doc.root()) {
        for (attribute, reference) in doc[owner].references() {
            if let Reference::Pending { kind, name } = reference {
                pending.push(PendingRef {
                    owner,
                    attribute: Name::new(attribute),
                    kind: *kind,
                    name: name.clone(),
                });
            }
        }
    }
    pending
}
