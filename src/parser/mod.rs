//! Source document parsing.
//!
//! Each supported format has its own parser producing the shared
//! [`Document`] model. Dispatch happens on [`SourceFormat`].

mod docx_parser;
mod options;
mod text_parser;

pub use docx_parser::{parse_document_xml, DocxParser};
pub use options::{ErrorMode, ParseOptions, DEFAULT_FALLBACK_ENCODING};
pub use text_parser::{decode_text, lookup_encoding, TextParser};

use std::path::Path;

use crate::detect::detect_format_from_path;
use crate::error::Result;
use crate::model::{Document, SourceFormat};

/// Parse a file, choosing the parser from its extension and content.
pub fn parse_path<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    match detect_format_from_path(path)? {
        SourceFormat::Text => TextParser::open_with_options(path, options)?.parse(),
        SourceFormat::Docx => DocxParser::open_with_options(path, options)?.parse(),
    }
}

/// Parse in-memory content of a known format.
pub fn parse_bytes(data: &[u8], format: SourceFormat, options: ParseOptions) -> Result<Document> {
    match format {
        SourceFormat::Text => TextParser::from_bytes_with_options(data, options).parse(),
        SourceFormat::Docx => DocxParser::from_bytes_with_options(data, options).parse(),
    }
}

/// File name recorded in document metadata.
fn source_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
