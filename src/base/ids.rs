/// Handle of an element in a document arena.
///
/// Handles are indices and stay valid for the lifetime of the document: elements
/// are never moved or freed while the document exists, only detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Create a new ElementId from an index.
    ///
    /// A document holds at most `u32::MAX` elements; larger indices are a
    /// caller bug.
    pub fn new(index: usize) -> Self {
        debug_assert!(u32::try_from(index).is_ok(), "element index {index} exceeds u32");
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a global variable in a document's variable registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(pub u32);

impl VariableId {
    /// Same limit as [`ElementId::new`].
    pub fn new(index: usize) -> Self {
        debug_assert!(u32::try_from(index).is_ok(), "variable index {index} exceeds u32");
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
