//! Re-derivation of the structural event stream from a tree.

use super::document::Document;
use super::event::MarkupEvent;
use super::reference::AttrValue;
use crate::base::{ElementId, Name};

enum Step {
    Open(ElementId),
    Close(ElementId),
}

impl Document {
    /// Re-derive the event stream that describes the reachable tree.
    ///
    /// The identity attribute comes first, then the remaining attributes in
    /// source order. Resolved references are written back from their
    /// target's identifier. Feeding the result to a
    /// [`Builder`](crate::builder::Builder) reproduces the same stream.
    pub fn to_events(&self) -> Vec<MarkupEvent> {
        let mut events = Vec::new();
        let mut stack = vec![Step::Open(self.root())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id) => {
                    events.push(MarkupEvent::Opened {
                        tag: Name::new_static(self[id].kind().tag()),
                        attributes: self.event_attributes(id),
                    });
                    stack.push(Step::Close(id));
                    stack.extend(self.children(id).rev().map(Step::Open));
                }
                Step::Close(id) => events.push(MarkupEvent::Closed {
                    tag: Name::new_static(self[id].kind().tag()),
                }),
            }
        }

        events.push(MarkupEvent::Ended);
        events
    }

    fn event_attributes(&self, id: ElementId) -> Vec<(Name, String)> {
        let element = &self[id];
        let mut attributes = Vec::with_capacity(element.attributes.len() + 1);
        if let (Some(attribute), Some(value)) = (element.schema().identity.attribute(), element.id()) {
            attributes.push((Name::new_static(attribute), value.to_string()));
        }
        for (name, value) in &element.attributes {
            let text = match value {
                AttrValue::Text(text) => Some(text.clone()),
                AttrValue::Ref(reference) => self.reference_text(reference),
            };
            if let Some(text) = text {
                attributes.push((name.clone(), text.to_string()));
            }
        }
        attributes
    }
}
