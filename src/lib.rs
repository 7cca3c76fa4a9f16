//! # dochtml
//!
//! Converts plain-text and DOCX documents into HTML fragments.
//!
//! Each paragraph becomes one `<p>` block inside a justified `<div>`
//! container. Bold, italic and underline runs are reconciled into
//! correctly nested inline tags, and empty paragraphs split the container
//! to leave a visual gap.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dochtml::{parse_file, render, LayoutConfig};
//!
//! fn main() -> dochtml::Result<()> {
//!     let doc = parse_file("letter.docx")?;
//!
//!     let options = render::RenderOptions::new()
//!         .with_layout(LayoutConfig::from_path("basic.ini", None)?);
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two sources**: plain text (any encoding, cp1251 fallback) and DOCX
//! - **Well-formed inline markup**: `<b>`, `<i>`, `<u>` always nest properly
//! - **Layout from configuration**: widths, indents and margins from INI or JSON
//! - **Batch conversion**: whole directories in parallel with Rayon

pub mod config;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use config::{ConfigMap, LayoutConfig, MarginConfig};
pub use convert::{
    convert_directory, convert_file, BatchOptions, BatchReport, ConvertOptions, ConvertResult,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_supported};
pub use error::{Error, Result};
pub use model::{Alignment, Document, Metadata, Paragraph, SourceFormat, TextRun, TextStyle};
pub use parser::{DocxParser, ParseOptions, TextParser};
pub use render::{HtmlDocument, JsonFormat, RenderOptions};

use std::path::Path;

/// Parse a `.txt` or `.docx` file into a document.
///
/// # Example
///
/// ```no_run
/// use dochtml::parse_file;
///
/// let doc = parse_file("letter.docx").unwrap();
/// println!("Paragraphs: {}", doc.paragraph_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parser::parse_path(path, ParseOptions::default())
}

/// Parse a file with custom options.
///
/// # Example
///
/// ```no_run
/// use dochtml::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_encoding("koi8-r");
/// let doc = parse_file_with_options("notes.txt", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    parser::parse_path(path, options)
}

/// Parse in-memory content, detecting DOCX by its ZIP signature.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let format = detect_format_from_bytes(data)?;
    parser::parse_bytes(data, format, ParseOptions::default())
}

/// Convert a file to a single HTML string with the given layout.
///
/// # Example
///
/// ```no_run
/// use dochtml::{to_html, LayoutConfig};
///
/// let html = to_html("letter.docx", &LayoutConfig::default()).unwrap();
/// std::fs::write("letter.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P, layout: &LayoutConfig) -> Result<String> {
    let options = RenderOptions::new().with_layout(layout.clone());
    to_html_with_options(path, &options)
}

/// Convert a file to HTML with custom render options.
pub fn to_html_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, options)
}

/// Dump the parsed document model of a file as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting documents.
///
/// # Example
///
/// ```no_run
/// use dochtml::Dochtml;
///
/// let html = Dochtml::new()
///     .with_config_file("basic.ini", None)?
///     .with_separator("\n")
///     .lenient()
///     .parse("letter.docx")?
///     .to_html()?;
/// # Ok::<(), dochtml::Error>(())
/// ```
pub struct Dochtml {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Dochtml {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Force the text encoding instead of detecting it.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_encoding(label);
        self
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.render_options = self.render_options.with_layout(layout);
        self
    }

    /// Load the layout from an INI or JSON file.
    pub fn with_config_file<P: AsRef<Path>>(self, path: P, section: Option<&str>) -> Result<Self> {
        let layout = LayoutConfig::from_path(path, section)?;
        Ok(self.with_layout(layout))
    }

    /// Set the text placed between output fragments.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_separator(separator);
        self
    }

    /// Parse a file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<DochtmlResult> {
        let document = parser::parse_path(path, self.parse_options)?;
        Ok(DochtmlResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse in-memory content of a known format.
    pub fn parse_bytes(self, data: &[u8], format: SourceFormat) -> Result<DochtmlResult> {
        let document = parser::parse_bytes(data, format, self.parse_options)?;
        Ok(DochtmlResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Dochtml {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a document.
pub struct DochtmlResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl DochtmlResult {
    /// Render to a single HTML string.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Render to ordered fragments.
    pub fn fragments(&self) -> Result<HtmlDocument> {
        render::to_fragments(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text without markup.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
