//! Document-wide registry of global variables referenced by rules.

use indexmap::IndexSet;

use crate::base::{Name, VariableId};

/// Deduplicated-by-name set of variables, owned by the document.
///
/// Rules refer to variables by name; the resolver interns each name here the
/// first time it is seen, so lookups never fail.
#[derive(Clone, Debug, Default)]
pub struct VariableRegistry {
    names: IndexSet<Name>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable, creating it on a miss.
    pub fn get_or_insert(&mut self, name: &str) -> VariableId {
        if let Some(index) = self.names.get_index_of(name) {
            return VariableId::new(index);
        }
        let (index, _) = self.names.insert_full(Name::new(name));
        tracing::trace!("[VARIABLES] registered '{}' as {}", name, index);
        VariableId::new(index)
    }

    /// Look up a variable without creating it.
    pub fn get(&self, name: &str) -> Option<VariableId> {
        self.names.get_index_of(name).map(VariableId::new)
    }

    pub fn name(&self, id: VariableId) -> Option<&str> {
        self.names.get_index(id.index()).map(Name::as_str)
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (VariableId::new(index), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
