//! Ordered child collection with replace-on-equal insertion.
//!
//! Each entry is keyed by what makes two children "the same" under the
//! child's [`Equivalence`](super::Equivalence) rule. Inserting an entry whose
//! key is already taken evicts the previous element and appends the new one
//! at the end (last write wins). Iteration follows insertion order, which is
//! also the order children are re-emitted in.

use indexmap::IndexMap;

use super::ChildSlot;
use crate::base::{ElementId, Name};

/// Collection key of one child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// Identifiable child, equal by identifier within its slot.
    Identified { slot: ChildSlot, id: Name },
    /// Child equal by a composite of attribute values (empty for singletons).
    Equivalent { slot: ChildSlot, key: Name },
    /// Child never equal to another entry.
    Distinct { slot: ChildSlot, element: ElementId },
}

impl EntryKey {
    pub fn slot(&self) -> ChildSlot {
        match self {
            EntryKey::Identified { slot, .. }
            | EntryKey::Equivalent { slot, .. }
            | EntryKey::Distinct { slot, .. } => *slot,
        }
    }

    /// The identifier for identified entries.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            EntryKey::Identified { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Outcome of [`ElementCollection::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// New entry appended.
    Added,
    /// An equal entry was evicted; the new one was appended.
    Replaced(ElementId),
    /// The element was already stored under that key.
    Unchanged,
}

impl Insertion {
    /// Whether membership changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Insertion::Unchanged)
    }
}

/// Ordered, deduplicated list of child handles.
#[derive(Clone, Debug, Default)]
pub struct ElementCollection {
    entries: IndexMap<EntryKey, ElementId>,
}

impl ElementCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `element` under `key`, evicting any equal entry.
    pub fn insert(&mut self, key: EntryKey, element: ElementId) -> Insertion {
        match self.entries.get(&key) {
            Some(&existing) if existing == element => Insertion::Unchanged,
            Some(_) => {
                // shift_remove keeps the remaining order; the newcomer goes last.
                let evicted = self.entries.shift_remove(&key);
                self.remove(element);
                self.entries.insert(key, element);
                match evicted {
                    Some(old) => Insertion::Replaced(old),
                    None => Insertion::Added,
                }
            }
            None => {
                self.remove(element);
                self.entries.insert(key, element);
                Insertion::Added
            }
        }
    }

    /// Change the key of a stored element without moving it.
    ///
    /// An equal entry already stored under `key` is evicted. Returns `None`
    /// when `element` is not in the collection.
    pub fn rekey(&mut self, element: ElementId, key: EntryKey) -> Option<Insertion> {
        let mut index = self.position(element)?;
        if self.entries.get_index(index).map(|(k, _)| k) == Some(&key) {
            return Some(Insertion::Unchanged);
        }
        self.entries.shift_remove_index(index);
        let mut outcome = Insertion::Added;
        if let Some((evicted_index, _, evicted)) = self.entries.shift_remove_full(&key) {
            if evicted_index < index {
                index -= 1;
            }
            outcome = Insertion::Replaced(evicted);
        }
        self.entries.shift_insert(index, key, element);
        Some(outcome)
    }

    /// Remove an element. Returns its key if it was present.
    pub fn remove(&mut self, element: ElementId) -> Option<EntryKey> {
        let index = self.position(element)?;
        self.entries
            .shift_remove_index(index)
            .map(|(key, _)| key)
    }

    /// Remove the entry stored under `key`.
    pub fn remove_key(&mut self, key: &EntryKey) -> Option<ElementId> {
        self.entries.shift_remove(key)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.position(element).is_some()
    }

    pub fn contains_key(&self, key: &EntryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up an identifiable child by identifier.
    ///
    /// Returns `None` for slots whose children carry no identifier.
    pub fn get(&self, slot: ChildSlot, id: &str) -> Option<ElementId> {
        self.entries
            .get(&EntryKey::Identified {
                slot,
                id: Name::new(id),
            })
            .copied()
    }

    /// The key an element is stored under.
    pub fn key_of(&self, element: ElementId) -> Option<&EntryKey> {
        let index = self.position(element)?;
        self.entries.get_index(index).map(|(key, _)| key)
    }

    pub fn position(&self, element: ElementId) -> Option<usize> {
        self.entries.values().position(|&id| id == element)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.entries.values().copied()
    }

    /// Iterate over the entries of one slot, in insertion order.
    pub fn in_slot(&self, slot: ChildSlot) -> impl Iterator<Item = ElementId> + '_ {
        self.entries
            .iter()
            .filter(move |(key, _)| key.slot() == slot)
            .map(|(_, id)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
