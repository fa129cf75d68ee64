//! Foundation types for the NCL document model.
//!
//! This module provides the primitives used throughout the crate:
//! - [`ElementId`], [`VariableId`] - Stable arena handles
//! - [`Name`], [`is_valid_identifier`] - Identifier strings and their grammar
//! - [`Diagnostic`], [`Severity`], [`Messages`] - Soft failures attached to elements
//! - [`BuildOptions`] - Builder/resolver configuration
//!
//! This module has NO dependencies on other ncl modules.

mod diagnostics;
mod identifier;
mod ids;
mod options;

pub use diagnostics::{Diagnostic, Messages, Severity, codes};
pub use identifier::{Name, is_valid_identifier};
pub use ids::{ElementId, VariableId};
pub use options::BuildOptions;
