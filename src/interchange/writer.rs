//! Tree → indented markup.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::InterchangeError;
use crate::model::{Document, MarkupEvent};

/// Renders a [`Document`] as NCL markup.
///
/// Output is driven by [`Document::to_events`], so attribute order and
/// reference text match what the builder would re-read.
#[derive(Debug, Clone)]
pub struct NclWriter {
    indent: usize,
}

impl Default for NclWriter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl NclWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per nesting level.
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    pub fn write(&self, doc: &Document) -> Result<Vec<u8>, InterchangeError> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', self.indent);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| InterchangeError::xml(format!("Write error: {e}")))?;

        let events = doc.to_events();
        let mut iter = events.iter().peekable();
        while let Some(event) = iter.next() {
            let xml = match event {
                MarkupEvent::Opened { tag, attributes } => {
                    let mut start = BytesStart::new(tag.as_str());
                    for (name, value) in attributes {
                        start.push_attribute((name.as_str(), value.as_str()));
                    }
                    // An element without children collapses to a self-closing tag.
                    if matches!(iter.peek(), Some(MarkupEvent::Closed { .. })) {
                        iter.next();
                        Event::Empty(start)
                    } else {
                        Event::Start(start)
                    }
                }
                MarkupEvent::Closed { tag } => Event::End(BytesEnd::new(tag.as_str())),
                MarkupEvent::Ended => break,
            };
            writer
                .write_event(xml)
                .map_err(|e| InterchangeError::xml(format!("Write error: {e}")))?;
        }

        let mut output = buffer.into_inner();
        output.push(b'\n');
        Ok(output)
    }
}
