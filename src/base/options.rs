//! Builder and resolver options

/// Options controlling what happens between the first event and the finished tree.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Run the reference resolver when the document ends
    pub resolve_on_end: bool,
    /// Fold every element's messages up to the root when the document ends
    pub gather_diagnostics: bool,
    /// Run the validator after resolution
    pub validate_on_end: bool,
    /// Record a warning when a duplicate identifier replaces an earlier entry
    pub warn_on_override: bool,
    /// Treat a close event that does not match the open element as a hard error
    /// (false = pop to the matching element, or ignore the close)
    pub strict_events: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            resolve_on_end: true,
            gather_diagnostics: true,
            validate_on_end: false,
            warn_on_override: false,
            strict_events: true,
        }
    }
}

impl BuildOptions {
    /// Options that stop after construction: no resolution, no gathering.
    pub fn construction_only() -> Self {
        Self {
            resolve_on_end: false,
            gather_diagnostics: false,
            ..Self::default()
        }
    }
}
