//! Document model types.
//!
//! This module defines the intermediate representation that bridges
//! source parsing and HTML rendering. Documents are built once per input
//! and are read-only afterwards.

mod document;
mod paragraph;

pub use document::{Document, Metadata, SourceFormat};
pub use paragraph::{Alignment, Paragraph, TextRun, TextStyle};
