//! Plain-text document parser.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, SourceFormat};

use super::options::ParseOptions;

/// Plain-text document parser.
///
/// Each line of the file becomes one paragraph.
pub struct TextParser {
    data: Vec<u8>,
    source_name: Option<String>,
    options: ParseOptions,
}

impl TextParser {
    /// Open a text file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a text file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut parser = Self::from_bytes_with_options(data, options);
        parser.source_name = super::source_name(path);
        Ok(parser)
    }

    /// Parse text from bytes.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse text from bytes with custom options.
    pub fn from_bytes_with_options(data: impl Into<Vec<u8>>, options: ParseOptions) -> Self {
        Self {
            data: data.into(),
            source_name: None,
            options,
        }
    }

    /// Parse text from a reader.
    pub fn from_reader<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes_with_options(data, options))
    }

    /// Parse the text and return a Document.
    pub fn parse(&self) -> Result<Document> {
        let (text, encoding) = decode_text(&self.data, &self.options)?;

        let mut document = Document::new(SourceFormat::Text);
        document.metadata.source_name = self.source_name.clone();
        document.metadata.encoding = Some(encoding.name().to_string());

        for line in split_lines(&text) {
            document.add_paragraph(Paragraph::text(line));
        }

        log::debug!(
            "Parsed {} lines of {} text",
            document.paragraph_count(),
            encoding.name()
        );
        Ok(document)
    }
}

/// Split text on `\r\n`, `\n` or a lone `\r`.
///
/// A terminator at the very end does not start an extra empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Decode raw text bytes.
///
/// A forced encoding wins; otherwise a byte-order mark decides, then valid
/// UTF-8, then the fallback encoding.
pub fn decode_text<'a>(
    data: &'a [u8],
    options: &ParseOptions,
) -> Result<(Cow<'a, str>, &'static Encoding)> {
    let (encoding, body) = if let Some(ref label) = options.encoding {
        (lookup_encoding(label)?, data)
    } else if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        (encoding, &data[bom_len..])
    } else if std::str::from_utf8(data).is_ok() {
        (UTF_8, data)
    } else {
        let fallback = lookup_encoding(&options.fallback_encoding)?;
        log::debug!("Text is not valid UTF-8, decoding as {}", fallback.name());
        (fallback, data)
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        if options.is_lenient() {
            log::warn!(
                "Malformed {} sequences replaced with U+FFFD",
                encoding.name()
            );
        } else {
            return Err(Error::Encoding(format!(
                "input is not valid {}",
                encoding.name()
            )));
        }
    }

    Ok((text, encoding))
}

/// Resolve a WHATWG encoding label.
pub fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::Encoding(format!("unknown encoding label: {}", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_become_paragraphs() {
        let doc = TextParser::from_bytes("first\r\n\nthird\n").parse().unwrap();

        assert_eq!(doc.paragraph_count(), 3);
        assert_eq!(doc[0], Paragraph::text("first"));
        assert!(doc[1].is_empty());
        assert_eq!(doc[2], Paragraph::text("third"));
        assert_eq!(doc.metadata.encoding.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let doc = TextParser::from_bytes("mac\rstyle\r\rend\r").parse().unwrap();

        assert_eq!(doc.paragraph_count(), 4);
        assert_eq!(doc[0], Paragraph::text("mac"));
        assert_eq!(doc[1], Paragraph::text("style"));
        assert!(doc[2].is_empty());
        assert_eq!(doc[3], Paragraph::text("end"));
    }

    #[test]
    fn test_split_lines_mixed_endings() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\r\n"), vec!["a", ""]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_empty_input() {
        let doc = TextParser::from_bytes(Vec::new()).parse().unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let doc = TextParser::from_bytes(b"\xEF\xBB\xBFhello".to_vec())
            .parse()
            .unwrap();
        assert_eq!(doc[0].plain_text(), "hello");
    }

    #[test]
    fn test_fallback_to_cp1251() {
        // "Привет" in windows-1251
        let data = vec![0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let doc = TextParser::from_bytes(data).parse().unwrap();

        assert_eq!(doc[0].plain_text(), "Привет");
        assert_eq!(doc.metadata.encoding.as_deref(), Some("windows-1251"));
    }

    #[test]
    fn test_forced_encoding() {
        let options = ParseOptions::new().with_encoding("latin1");
        let doc = TextParser::from_bytes_with_options(vec![0x63, 0x61, 0x66, 0xE9], options)
            .parse()
            .unwrap();
        assert_eq!(doc[0].plain_text(), "café");
    }

    #[test]
    fn test_unknown_label() {
        let options = ParseOptions::new().with_encoding("no-such-charset");
        let result = TextParser::from_bytes_with_options(b"abc".to_vec(), options).parse();
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_malformed_forced_utf8() {
        let strict = ParseOptions::new().with_encoding("utf-8");
        let result = TextParser::from_bytes_with_options(vec![0x61, 0xFF], strict).parse();
        assert!(matches!(result, Err(Error::Encoding(_))));

        let lenient = ParseOptions::new().with_encoding("utf-8").lenient();
        let doc = TextParser::from_bytes_with_options(vec![0x61, 0xFF], lenient)
            .parse()
            .unwrap();
        assert_eq!(doc[0].plain_text(), "a\u{FFFD}");
    }

    #[test]
    fn test_open_records_source_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "line").unwrap();

        let doc = TextParser::open(&path).unwrap().parse().unwrap();
        assert_eq!(doc.metadata.source_name.as_deref(), Some("notes.txt"));
        assert_eq!(doc.metadata.format, SourceFormat::Text);
    }
}
