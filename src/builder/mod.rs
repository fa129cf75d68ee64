//! Incremental tree construction from structural events.
//!
//! The [`Builder`] keeps one frame per open element. Each opened element is
//! created from its parent's schema entry, filled from its attributes and
//! attached to the element on top of the stack. References stay pending
//! until [`Builder::document_ended`], which hands the finished tree to the
//! resolver.

use tracing::{debug, trace};

use crate::base::{BuildOptions, Diagnostic, ElementId, Name, codes};
use crate::error::BuildError;
use crate::model::{Document, ElementKind, Insertion, MarkupEvent};
use crate::resolve::Resolver;
use crate::validate::Validator;

/// Stack entry for one open markup element.
#[derive(Debug)]
enum Frame {
    /// A materialized element.
    Element(ElementId),
    /// An element unknown to its parent, skipped with its subtree.
    Ignored(Name),
}

/// Builds a [`Document`] from `opened / closed / ended` events.
#[derive(Debug)]
pub struct Builder {
    document: Document,
    options: BuildOptions,
    stack: Vec<Frame>,
    root_seen: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            document: Document::new(),
            options,
            stack: Vec::new(),
            root_seen: false,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// The tree built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Nesting depth of the currently open element.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume a whole event sequence.
    ///
    /// Stops at the first [`MarkupEvent::Ended`]; a sequence without one is
    /// ended implicitly.
    pub fn build(mut self, events: impl IntoIterator<Item = MarkupEvent>) -> Result<Document, BuildError> {
        for event in events {
            if let Some(document) = self.feed(event)? {
                return Ok(document);
            }
        }
        self.document_ended()
    }

    /// Apply one event. Returns the finished document on `Ended`.
    pub fn feed(&mut self, event: MarkupEvent) -> Result<Option<Document>, BuildError> {
        match event {
            MarkupEvent::Opened { tag, attributes } => {
                self.element_opened(&tag, attributes)?;
                Ok(None)
            }
            MarkupEvent::Closed { tag } => {
                self.element_closed(&tag)?;
                Ok(None)
            }
            MarkupEvent::Ended => self.document_ended().map(Some),
        }
    }

    /// An element starts.
    ///
    /// Tags the open parent does not accept are skipped together with their
    /// subtree. Missing required attributes are recorded as errors on the new
    /// element; an identifier violating the grammar aborts the build.
    pub fn element_opened<K, V>(
        &mut self,
        tag: &str,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), BuildError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parent = match self.stack.last() {
            None => return self.open_root(tag, attributes),
            Some(Frame::Ignored(_)) => {
                self.stack.push(Frame::Ignored(Name::new(tag)));
                return Ok(());
            }
            Some(Frame::Element(parent)) => *parent,
        };

        let parent_kind = self.document[parent].kind();
        let Some(kind) = parent_kind.child_for_tag(tag) else {
            trace!(tag, parent = %parent_kind, "ignoring unknown element");
            self.stack.push(Frame::Ignored(Name::new(tag)));
            return Ok(());
        };

        let id = self.document.create(kind);
        self.apply_attributes(id, attributes)?;

        match self.document.attach(parent, id)? {
            Insertion::Replaced(previous) => {
                trace!(element = %id, %previous, tag, "element overrides an equal sibling");
                if self.options.warn_on_override {
                    let message = match self.document[id].id() {
                        Some(name) => format!("<{tag}> '{name}' replaces an earlier declaration"),
                        None => format!("<{tag}> replaces an equal earlier declaration"),
                    };
                    self.document
                        .record(id, Diagnostic::warning(codes::OVERRIDDEN, message));
                }
            }
            Insertion::Added | Insertion::Unchanged => {}
        }

        self.stack.push(Frame::Element(id));
        Ok(())
    }

    fn open_root<K, V>(&mut self, tag: &str, attributes: impl IntoIterator<Item = (K, V)>) -> Result<(), BuildError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let expected = ElementKind::Document.tag();
        if self.root_seen || tag != expected {
            if self.options.strict_events {
                return Err(BuildError::UnexpectedRoot {
                    found: Name::new(tag),
                });
            }
            trace!(tag, "ignoring top-level element");
            self.stack.push(Frame::Ignored(Name::new(tag)));
            return Ok(());
        }

        let root = self.document.root();
        self.apply_attributes(root, attributes)?;
        self.root_seen = true;
        self.stack.push(Frame::Element(root));
        Ok(())
    }

    fn apply_attributes<K, V>(&mut self, id: ElementId, attributes: impl IntoIterator<Item = (K, V)>) -> Result<(), BuildError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let schema = self.document[id].schema();
        let identity = schema.identity.attribute();

        for (name, value) in attributes {
            let (name, value) = (name.as_ref(), value.as_ref());
            if identity == Some(name) {
                self.document.set_id(id, value)?;
            } else {
                self.document.store_attribute(id, name, value);
            }
        }

        if let (true, Some(attribute)) = (schema.identity.is_required(), identity) {
            if self.document[id].id().is_none() {
                self.missing_attribute(id, attribute);
            }
        }
        for attribute in schema.required {
            if !self.document[id].has_attribute(attribute) {
                self.missing_attribute(id, attribute);
            }
        }
        Ok(())
    }

    fn missing_attribute(&mut self, id: ElementId, attribute: &str) {
        let tag = self.document[id].kind().tag();
        self.document.record(
            id,
            Diagnostic::error(
                codes::MISSING_ATTRIBUTE,
                format!("<{tag}> requires attribute '{attribute}'"),
            ),
        );
    }

    /// The most recently opened element ends.
    pub fn element_closed(&mut self, tag: &str) -> Result<(), BuildError> {
        let Some(top) = self.stack.last() else {
            if self.options.strict_events {
                return Err(BuildError::UnexpectedClose {
                    found: Name::new(tag),
                });
            }
            trace!(tag, "ignoring close with nothing open");
            return Ok(());
        };

        let expected = self.frame_tag(top);
        if expected == tag {
            self.stack.pop();
            return Ok(());
        }
        if self.options.strict_events {
            return Err(BuildError::UnbalancedClose {
                expected: Name::new(expected),
                found: Name::new(tag),
            });
        }

        // Lenient: close up to the nearest frame with a matching tag.
        match self.stack.iter().rposition(|frame| self.frame_tag(frame) == tag) {
            Some(position) => {
                trace!(tag, unclosed = self.stack.len() - position - 1, "closing unbalanced frames");
                self.stack.truncate(position);
            }
            None => trace!(tag, "ignoring unmatched close"),
        }
        Ok(())
    }

    fn frame_tag<'a>(&'a self, frame: &'a Frame) -> &'a str {
        match frame {
            Frame::Element(id) => self.document[*id].kind().tag(),
            Frame::Ignored(tag) => tag.as_str(),
        }
    }

    /// Finish the document: resolve references and gather diagnostics.
    ///
    /// The builder is reset and may be reused for another document.
    pub fn document_ended(&mut self) -> Result<Document, BuildError> {
        if !self.root_seen {
            return Err(BuildError::MissingRoot);
        }
        if !self.stack.is_empty() {
            if self.options.strict_events {
                return Err(BuildError::UnclosedElements {
                    count: self.stack.len(),
                });
            }
            trace!(count = self.stack.len(), "closing unclosed elements at end");
            self.stack.clear();
        }

        let mut document = std::mem::take(&mut self.document);
        self.root_seen = false;
        debug!(elements = document.len(), "document ended");

        if self.options.resolve_on_end {
            Resolver::new().resolve(&mut document);
        }
        if self.options.validate_on_end {
            Validator::new().validate(&mut document);
        }
        if self.options.gather_diagnostics {
            document.gather_diagnostics();
        }
        Ok(document)
    }
}
