//! Structural and referential well-formedness checks.
//!
//! The [`Validator`] visits every element reachable from the starting point,
//! children before parents, and never stops early so a single pass reports
//! every problem. An element is valid when it carries no errors and all its
//! children are valid.
//!
//! Findings are recorded as errors on the offending element. Running the
//! validator again first drops its own earlier findings, so a fixed tree
//! validates clean.

use tracing::{debug, trace};

use crate::base::{Diagnostic, ElementId, codes};
use crate::model::{ChildSlot, Document, ElementKind, Vocabulary};

/// Codes only the validator produces.
const VALIDATOR_CODES: &[&str] = &[
    codes::EMPTY_COMPOSITE,
    codes::INVALID_VALUE,
    codes::UNRESOLVED_REQUIRED,
    codes::CARDINALITY,
];

/// Slots whose presence makes a body non-empty.
const BODY_CONTENT: &[ChildSlot] = &[
    ChildSlot::Meta,
    ChildSlot::Metadata,
    ChildSlot::Ports,
    ChildSlot::Properties,
    ChildSlot::Nodes,
    ChildSlot::Links,
];

/// Checks a resolved tree.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the whole document. Returns whether the root is valid.
    pub fn validate(&self, doc: &mut Document) -> bool {
        let root = doc.root();
        self.validate_subtree(doc, root)
    }

    /// Validate `from` and everything below it.
    pub fn validate_subtree(&self, doc: &mut Document, from: ElementId) -> bool {
        let order: Vec<ElementId> = doc.descendants(from).collect();
        let mut valid = vec![true; doc.len()];
        let mut invalid = 0usize;

        for &id in order.iter().rev() {
            if let Some(element) = doc.get_mut(id) {
                element
                    .messages
                    .retain(|d| !VALIDATOR_CODES.contains(&d.code));
            }

            for diagnostic in check(doc, id) {
                trace!(element = %id, code = diagnostic.code, "{}", diagnostic.message);
                doc.record(id, diagnostic);
            }

            let children_valid = doc.children(id).all(|child| valid[child.index()]);
            valid[id.index()] = children_valid && !doc[id].has_errors();
            if !valid[id.index()] {
                invalid += 1;
            }
        }

        debug!(elements = order.len(), invalid, "validation finished");
        valid[from.index()]
    }
}

/// Every rule applicable to one element.
fn check(doc: &Document, id: ElementId) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let element = &doc[id];
    let kind = element.kind();
    let tag = kind.tag();
    let count = |slot: ChildSlot| doc.children_in(id, slot).count();
    let count_kind = |kind: ElementKind| doc.children(id).filter(|c| doc[*c].kind() == kind).count();

    match kind {
        ElementKind::Body => {
            if !BODY_CONTENT.iter().any(|slot| count(*slot) > 0) {
                found.push(Diagnostic::error(
                    codes::EMPTY_COMPOSITE,
                    "<body> must contain at least one meta, metadata, port, property, node or link",
                ));
            }
        }
        k if k.is_base() => {
            if element.children().is_empty() {
                found.push(Diagnostic::error(
                    codes::EMPTY_COMPOSITE,
                    format!("<{tag}> is empty"),
                ));
            }
        }
        ElementKind::CausalConnector => {
            let (conditions, actions) = (count(ChildSlot::Conditions), count(ChildSlot::Actions));
            if conditions != 1 || actions != 1 {
                found.push(cardinality(format!(
                    "<{tag}> needs exactly one condition and one action, found {conditions} and {actions}"
                )));
            }
        }
        ElementKind::CompoundCondition
        | ElementKind::CompoundStatement
        | ElementKind::CompoundAction
        | ElementKind::CompositeRule => {
            if element.children().is_empty() {
                found.push(cardinality(format!("<{tag}> has no operands")));
            }
        }
        ElementKind::AssessmentStatement => {
            let assessments = count(ChildSlot::Assessments);
            if assessments != 2 || count_kind(ElementKind::AttributeAssessment) == 0 {
                found.push(cardinality(format!(
                    "<{tag}> needs two assessments, at least one an attributeAssessment"
                )));
            }
        }
        ElementKind::DescriptorSwitch => {
            if count_kind(ElementKind::Descriptor) == 0 {
                found.push(cardinality(format!("<{tag}> has no descriptor")));
            }
        }
        // A reusing switch takes its content from the referred one.
        ElementKind::Switch if !element.has_attribute("refer") => {
            if count(ChildSlot::Nodes) == 0 {
                found.push(cardinality(format!("<{tag}> has no node to select")));
            }
        }
        ElementKind::SwitchPort => {
            if count(ChildSlot::Mappings) == 0 {
                found.push(cardinality(format!("<{tag}> has no mapping")));
            }
        }
        ElementKind::Link => {
            if count(ChildSlot::Binds) == 0 {
                found.push(cardinality(format!("<{tag}> has no bind")));
            }
        }
        _ => {}
    }

    let schema = element.schema();
    for (attribute, ref_kind) in schema.references {
        if ref_kind.sigil().is_some() || !schema.required.contains(attribute) {
            continue;
        }
        if let Some(reference) = element.reference(attribute) {
            if !reference.is_resolved() {
                found.push(Diagnostic::error(
                    codes::UNRESOLVED_REQUIRED,
                    format!(
                        "<{tag}> {attribute}: {} '{}' is unresolved",
                        ref_kind.describe(),
                        reference.pending_name().unwrap_or_default()
                    ),
                ));
            }
        }
    }

    for (attribute, value) in element.attributes() {
        let Some(vocabulary) = Vocabulary::of(kind, attribute) else {
            continue;
        };
        if let Some(text) = value.as_text() {
            if !vocabulary.accepts(text) {
                found.push(Diagnostic::error(
                    codes::INVALID_VALUE,
                    format!("<{tag}> {attribute}: '{text}' is not a valid value"),
                ));
            }
        }
    }

    found
}

fn cardinality(message: String) -> Diagnostic {
    Diagnostic::error(codes::CARDINALITY, message)
}

impl Document {
    /// Run the [`Validator`] over the whole tree and re-gather diagnostics.
    pub fn validate(&mut self) -> bool {
        let valid = Validator::new().validate(self);
        self.gather_diagnostics();
        valid
    }
}
