//! JSON rendering of the parsed document model.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, Paragraph, SourceFormat, TextRun};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new(SourceFormat::Docx);
        doc.metadata.source_name = Some("letter.docx".to_string());
        doc.add_paragraph(Paragraph::rich_aligned(
            vec![TextRun::bold("Hello")],
            Alignment::Right,
        ));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"source_name\""));
        assert!(json.contains("letter.docx"));
        assert!(json.contains("\"type\": \"rich\""));
        assert!(json.contains("\"alignment\": \"right\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let mut doc = Document::new(SourceFormat::Text);
        doc.add_paragraph(Paragraph::text("line"));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#"{"type":"text","line":"line"}"#));
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::new(SourceFormat::Docx);
        doc.add_paragraph(Paragraph::rich(vec![TextRun::italic("x")]));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.paragraphs, doc.paragraphs);
    }
}
