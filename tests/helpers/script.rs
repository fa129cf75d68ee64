//! A small writer for builder event sequences.

use ncl::MarkupEvent;

/// Accumulates `opened / closed` events; [`Script::events`] closes whatever
/// is still open and appends `Ended`.
#[derive(Debug, Default, Clone)]
pub struct Script {
    events: Vec<MarkupEvent>,
    open: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// A script already inside `<ncl id="...">`.
    pub fn document(id: &str) -> Self {
        Self::new().open("ncl", &[("id", id)])
    }

    pub fn open(mut self, tag: &str, attributes: &[(&str, &str)]) -> Self {
        self.events
            .push(MarkupEvent::opened(tag, attributes.iter().copied()));
        self.open.push(tag.to_string());
        self
    }

    /// An element without children.
    pub fn leaf(self, tag: &str, attributes: &[(&str, &str)]) -> Self {
        self.open(tag, attributes).close()
    }

    /// Close the most recently opened element.
    pub fn close(mut self) -> Self {
        if let Some(tag) = self.open.pop() {
            self.events.push(MarkupEvent::closed(&tag));
        }
        self
    }

    /// Close up to and including the nearest open `tag`.
    pub fn close_to(mut self, tag: &str) -> Self {
        while let Some(open) = self.open.last().cloned() {
            self = self.close();
            if open == tag {
                break;
            }
        }
        self
    }

    pub fn events(mut self) -> Vec<MarkupEvent> {
        while !self.open.is_empty() {
            self = self.close();
        }
        self.events.push(MarkupEvent::Ended);
        self.events
    }
}
