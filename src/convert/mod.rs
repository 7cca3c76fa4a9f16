//! Document conversion front-end.
//!
//! Ties parsing and rendering together for single files and, through
//! [`convert_directory`], for whole directories.
//!
//! # Example
//!
//! ```no_run
//! use dochtml::convert::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> dochtml::Result<()> {
//!     let result = convert_file(Path::new("letter.docx"), &ConvertOptions::default())?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod batch;

pub use batch::{
    collect_inputs, convert_directory, dated_output_dir_name, default_output_dir, BatchOptions,
    BatchReport, ConvertedFile, SkippedFile, OUTPUT_DIR_PREFIX,
};

use std::borrow::Cow;
use std::path::Path;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::model::{Document, Metadata, SourceFormat};
use crate::parser::{self, lookup_encoding, ParseOptions};
use crate::render::{to_fragments, RenderOptions};

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Encoding label for written output
    pub output_encoding: String,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.render.layout = layout;
        self
    }

    /// Set the output encoding label (e.g. `"windows-1251"`).
    pub fn with_output_encoding(mut self, label: impl Into<String>) -> Self {
        self.output_encoding = label.into();
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
            output_encoding: "utf-8".to_string(),
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted HTML
    pub content: String,

    /// Source document metadata
    pub metadata: Metadata,

    /// Number of output fragments
    pub fragment_count: usize,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Encode the content for writing.
    pub fn encode(&self, label: &str) -> Result<Cow<'_, [u8]>> {
        encode_output(&self.content, label)
    }
}

/// Convert a file to HTML.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
    let doc = parser::parse_path(path, options.parse.clone())?;
    convert_document(&doc, options)
}

/// Convert in-memory content of a known format to HTML.
pub fn convert_bytes(
    data: &[u8],
    format: SourceFormat,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let doc = parser::parse_bytes(data, format, options.parse.clone())?;
    convert_document(&doc, options)
}

/// Render an already parsed document.
pub fn convert_document(doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
    let html = to_fragments(doc, &options.render)?;
    Ok(ConvertResult {
        content: html.join(&options.render.separator),
        metadata: doc.metadata.clone(),
        fragment_count: html.len(),
    })
}

/// Encode text with a WHATWG encoding label.
///
/// Characters the encoding cannot represent are written as HTML numeric
/// character references.
pub fn encode_output<'a>(text: &'a str, label: &str) -> Result<Cow<'a, [u8]>> {
    let encoding = lookup_encoding(label)?;
    let (bytes, used, had_unmappable) = encoding.encode(text);
    if used != encoding {
        log::warn!(
            "{} cannot be used for output, wrote {} instead",
            encoding.name(),
            used.name()
        );
    }
    if had_unmappable {
        log::warn!(
            "Characters not representable in {} were written as character references",
            used.name()
        );
    }
    Ok(bytes)
}
