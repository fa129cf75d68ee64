//! Identifier grammar shared by every identifiable element.
//!
//! ```text
//! identifier := [_:A-Za-z] [-._:A-Za-z0-9]*
//! ```

use smol_str::SmolStr;

/// Identifier and attribute text. Inline for short strings, cheap to clone.
pub type Name = SmolStr;

#[inline]
fn is_start_character(c: char) -> bool {
    c == '_' || c == ':' || c.is_ascii_alphabetic()
}

#[inline]
fn is_name_character(c: char) -> bool {
    is_start_character(c) || c == '-' || c == '.' || c.is_ascii_digit()
}

/// Check a string against the identifier grammar.
///
/// # Example
/// ```
/// use ncl::base::is_valid_identifier;
///
/// assert!(is_valid_identifier("video1"));
/// assert!(is_valid_identifier("_ctx:main.v-2"));
/// assert!(!is_valid_identifier("1video"));
/// assert!(!is_valid_identifier(""));
/// ```
pub fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if is_start_character(first) => chars.all(is_name_character),
        _ => false,
    }
}
