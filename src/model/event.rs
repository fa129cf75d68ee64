//! Structural events exchanged with markup readers and renderers.

use crate::base::Name;

/// One event of a depth-first markup traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An element starts; attributes in source order.
    Opened {
        tag: Name,
        attributes: Vec<(Name, String)>,
    },
    /// The most recently opened element ends.
    Closed { tag: Name },
    /// No more events follow.
    Ended,
}

impl MarkupEvent {
    /// Build an `Opened` event from borrowed pairs.
    pub fn opened<'a>(tag: &str, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::Opened {
            tag: Name::new(tag),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (Name::new(k), v.to_string()))
                .collect(),
        }
    }

    pub fn closed(tag: &str) -> Self {
        Self::Closed { tag: Name::new(tag) }
    }
}
