//! Markup → builder events.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use super::InterchangeError;
use crate::base::{BuildOptions, Name};
use crate::builder::Builder;
use crate::model::{Document, MarkupEvent};

/// Reads NCL markup into a [`Document`].
///
/// Self-closing tags become an open and a close event. Text, comments,
/// processing instructions and the XML declaration are skipped.
#[derive(Debug, Clone, Default)]
pub struct NclReader {
    options: BuildOptions,
}

impl NclReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Read and build a document.
    pub fn read(&self, input: &[u8]) -> Result<Document, InterchangeError> {
        let events = self.events(input)?;
        Ok(Builder::with_options(self.options.clone()).build(events)?)
    }

    /// Tokenize markup into the builder's event stream, `Ended` included.
    pub fn events(&self, input: &[u8]) -> Result<Vec<MarkupEvent>, InterchangeError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut events = Vec::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let (tag, attributes) = start_tag(e)?;
                    events.push(MarkupEvent::Opened { tag, attributes });
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing element - handle as start + end
                    let (tag, attributes) = start_tag(e)?;
                    events.push(MarkupEvent::Opened {
                        tag: tag.clone(),
                        attributes,
                    });
                    events.push(MarkupEvent::Closed { tag });
                }
                Ok(Event::End(ref e)) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())?;
                    events.push(MarkupEvent::closed(tag));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(InterchangeError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        events.push(MarkupEvent::Ended);
        debug!(events = events.len(), "markup tokenized");
        Ok(events)
    }
}

fn start_tag(e: &BytesStart<'_>) -> Result<(Name, Vec<(Name, String)>), InterchangeError> {
    let name = e.name();
    let tag = Name::new(std::str::from_utf8(name.as_ref())?);
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| InterchangeError::xml(format!("Invalid attribute: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| InterchangeError::xml(format!("Invalid attribute value: {e}")))?;
        attributes.push((Name::new(key), value.into_owned()));
    }
    Ok((tag, attributes))
}
