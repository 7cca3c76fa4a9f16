//! HTML fragment rendering.
//!
//! A document renders to a flat sequence of fragments:
//!
//! ```text
//! <div ...>  ( <p ...>inline</p> | </div><div ...> )*  </div>
//! ```
//!
//! Each paragraph yields exactly one unit, in input order. Empty
//! paragraphs close and reopen the container to leave a visual gap.

use crate::error::Result;
use crate::model::{Alignment, Document, Paragraph};

use super::layout::LayoutStyles;
use super::reconcile::reconcile;
use super::RenderOptions;

/// Closing tag of the container.
pub const CONTAINER_CLOSE: &str = "</div>";

/// Closing tag of a paragraph block.
pub const BLOCK_CLOSE: &str = "</p>";

/// Render a document to a single HTML string.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    Ok(to_fragments(doc, options)?.join(&options.separator))
}

/// Render a document to its ordered fragments.
pub fn to_fragments(doc: &Document, options: &RenderOptions) -> Result<HtmlDocument> {
    let renderer = HtmlRenderer::new(LayoutStyles::from_config(&options.layout));
    Ok(renderer.render(doc))
}

/// Rendered output of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    fragments: Vec<String>,
}

impl HtmlDocument {
    /// All fragments in output order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Take ownership of the fragments.
    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }

    /// Number of fragments, including the two container tags.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Join the fragments with a separator.
    pub fn join(&self, separator: &str) -> String {
        self.fragments.join(separator)
    }
}

impl std::fmt::Display for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for fragment in &self.fragments {
            f.write_str(fragment)?;
        }
        Ok(())
    }
}

/// HTML renderer for one layout.
///
/// Tags are built once from the layout styles and reused for every
/// paragraph.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    container_open: String,
    block_style: String,
}

impl HtmlRenderer {
    /// Create a renderer from formatted layout styles.
    pub fn new(styles: LayoutStyles) -> Self {
        Self {
            container_open: open_tag("div", Alignment::Justify, &styles.container_style),
            block_style: styles.block_style,
        }
    }

    /// Opening tag of the container.
    pub fn container_open(&self) -> &str {
        &self.container_open
    }

    /// Opening tag of a paragraph block with the given alignment.
    pub fn block_open(&self, alignment: Alignment) -> String {
        open_tag("p", alignment, &self.block_style)
    }

    /// Structural break: close the container and open a new one.
    pub fn section_break(&self) -> String {
        format!("{}{}", CONTAINER_CLOSE, self.container_open)
    }

    /// Inline content of a paragraph.
    ///
    /// Text lines are trimmed and carry no tags; rich paragraphs are
    /// reconciled. Paragraphs that are empty in the model give an empty
    /// string even if their runs would reconcile to a bare tag pair.
    pub fn inline(&self, paragraph: &Paragraph) -> String {
        if paragraph.is_empty() {
            return String::new();
        }
        match paragraph {
            Paragraph::Text { line } => line.trim().to_string(),
            Paragraph::Rich { runs, .. } => reconcile(runs),
        }
    }

    /// Wrap reconciled inline content into its output unit.
    pub fn wrap(&self, alignment: Alignment, inline: &str) -> String {
        if inline.is_empty() {
            self.section_break()
        } else {
            format!("{}{}{}", self.block_open(alignment), inline, BLOCK_CLOSE)
        }
    }

    /// Render one paragraph to its output unit.
    pub fn render_paragraph(&self, paragraph: &Paragraph) -> String {
        self.wrap(paragraph.alignment(), &self.inline(paragraph))
    }

    /// Render a whole document.
    pub fn render(&self, doc: &Document) -> HtmlDocument {
        let mut fragments = Vec::with_capacity(doc.paragraphs.len() + 2);
        fragments.push(self.container_open.clone());
        fragments.extend(doc.paragraphs.iter().map(|p| self.render_paragraph(p)));
        fragments.push(CONTAINER_CLOSE.to_string());

        log::debug!(
            "Rendered {} paragraphs into {} fragments",
            doc.paragraphs.len(),
            fragments.len()
        );
        HtmlDocument { fragments }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(LayoutStyles::default())
    }
}

fn open_tag(name: &str, alignment: Alignment, style: &str) -> String {
    if style.is_empty() {
        format!("<{} align='{}'>", name, alignment)
    } else {
        format!("<{} align='{}' style='{}'>", name, alignment, style)
    }
}
