//! NCL markup interchange.
//!
//! Thin adapters between XML text and the structural event stream:
//!
//! ```text
//! ┌──────────────┐  NclReader   ┌──────────────┐   Builder    ┌──────────────┐
//! │  NCL markup  │ ───────────▶ │ MarkupEvents │ ───────────▶ │   Document   │
//! └──────────────┘              └──────────────┘              └──────┬───────┘
//!        ▲                                                           │
//!        └──────────────────── NclWriter (to_events) ────────────────┘
//! ```
//!
//! File loading stays with the caller.
//!
//! ## Usage
//!
//! ```ignore
//! use ncl::interchange::{NclReader, NclWriter};
//!
//! let bytes = std::fs::read("main.ncl")?;
//! let doc = NclReader::new().read(&bytes)?;
//! let markup = NclWriter::new().write(&doc)?;
//! ```

mod error;
mod reader;
mod writer;

pub use error::InterchangeError;
pub use reader::NclReader;
pub use writer::NclWriter;
