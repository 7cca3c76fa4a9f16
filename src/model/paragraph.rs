//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of a source document.
///
/// Text documents carry raw lines; DOCX documents carry styled runs and an
/// alignment. Both render through the same wrapping logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paragraph {
    /// One line of a plain-text document
    Text {
        /// The line as read, without the line terminator
        line: String,
    },

    /// A paragraph of a word-processor document
    Rich {
        /// Text runs in reading order
        runs: Vec<TextRun>,
        /// Paragraph alignment
        #[serde(default)]
        alignment: Alignment,
    },
}

impl Paragraph {
    /// Create a plain-text paragraph from one line.
    pub fn text(line: impl Into<String>) -> Self {
        Paragraph::Text { line: line.into() }
    }

    /// Create a justified rich paragraph.
    pub fn rich(runs: Vec<TextRun>) -> Self {
        Paragraph::Rich {
            runs,
            alignment: Alignment::Justify,
        }
    }

    /// Create a rich paragraph with an explicit alignment.
    pub fn rich_aligned(runs: Vec<TextRun>, alignment: Alignment) -> Self {
        Paragraph::Rich { runs, alignment }
    }

    /// Paragraph alignment. Text lines are always justified.
    pub fn alignment(&self) -> Alignment {
        match self {
            Paragraph::Text { .. } => Alignment::Justify,
            Paragraph::Rich { alignment, .. } => *alignment,
        }
    }

    /// Styled runs of the paragraph (empty for text lines).
    pub fn runs(&self) -> &[TextRun] {
        match self {
            Paragraph::Text { .. } => &[],
            Paragraph::Rich { runs, .. } => runs,
        }
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        match self {
            Paragraph::Text { line } => line.clone(),
            Paragraph::Rich { runs, .. } => runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }

    /// Check if the paragraph is a structural break.
    ///
    /// A text line is empty when it is blank after trimming; a rich
    /// paragraph is empty when it has no runs or only empty-text runs.
    pub fn is_empty(&self) -> bool {
        match self {
            Paragraph::Text { line } => line.trim().is_empty(),
            Paragraph::Rich { runs, .. } => runs.iter().all(TextRun::is_empty),
        }
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::BOLD)
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::ITALIC)
    }

    /// Create an underlined text run.
    pub fn underline(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::UNDERLINE)
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Character-level style flags.
///
/// Flags the source leaves undefined are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,
}

impl TextStyle {
    /// No formatting.
    pub const PLAIN: TextStyle = TextStyle::new(false, false, false);
    /// Bold only.
    pub const BOLD: TextStyle = TextStyle::new(true, false, false);
    /// Italic only.
    pub const ITALIC: TextStyle = TextStyle::new(false, true, false);
    /// Underline only.
    pub const UNDERLINE: TextStyle = TextStyle::new(false, false, true);

    /// Create a style from the three flags.
    pub const fn new(bold: bool, italic: bool, underline: bool) -> Self {
        Self {
            bold,
            italic,
            underline,
        }
    }

    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Justified (default)
    #[default]
    Justify,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Map a WordprocessingML `w:jc` value to an alignment.
    ///
    /// Only right alignment is preserved; everything else is justified.
    pub fn from_jc(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "right" | "end" => Alignment::Right,
            _ => Alignment::Justify,
        }
    }

    /// Value of the HTML `align` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Justify => "justify",
            Alignment::Right => "right",
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
