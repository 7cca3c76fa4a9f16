//! Document-level types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A parsed source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (source name, format, etc.)
    pub metadata: Metadata,

    /// Paragraphs in reading order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a new empty document of the given format.
    pub fn new(format: SourceFormat) -> Self {
        Self {
            metadata: Metadata::new(format),
            paragraphs: Vec::new(),
        }
    }

    /// Create a document from paragraphs.
    pub fn from_paragraphs(format: SourceFormat, paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Self::new(format);
        for paragraph in paragraphs {
            doc.add_paragraph(paragraph);
        }
        doc
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
        self.metadata.paragraph_count = self.paragraphs.len();
    }

    /// Get the number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Total number of styled runs across all paragraphs.
    pub fn run_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.runs().len()).sum()
    }

    /// Check if the document has any paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get plain text content of the entire document, one paragraph per line.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::ops::Index<usize> for Document {
    type Output = Paragraph;

    fn index(&self, index: usize) -> &Paragraph {
        &self.paragraphs[index]
    }
}

/// Kind of source a document was read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Plain-text file
    #[default]
    Text,
    /// Office Open XML word-processor file
    Docx,
}

impl SourceFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Text => "txt",
            SourceFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Text => write!(f, "Plain text"),
            SourceFormat::Docx => write!(f, "DOCX"),
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Source file name, when read from disk
    pub source_name: Option<String>,

    /// Source format
    pub format: SourceFormat,

    /// Number of paragraphs
    pub paragraph_count: usize,

    /// Encoding used to decode a text source
    pub encoding: Option<String>,
}

impl Metadata {
    /// Create new metadata for a source format.
    pub fn new(format: SourceFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }
}
