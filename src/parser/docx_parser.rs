//! DOCX document parser using zip and quick-xml.
//!
//! Only the main document part (`word/document.xml`) is read. Run flags
//! come from direct run properties; style inheritance is not resolved, so
//! a flag that is not set directly on the run is `false`.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{Alignment, Document, Paragraph, SourceFormat, TextRun, TextStyle};

use super::options::ParseOptions;

/// Path of the main document part inside the container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the buffer reserved from a ZIP entry's declared size.
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// DOCX document parser.
pub struct DocxParser {
    data: Vec<u8>,
    source_name: Option<String>,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut parser = Self::from_bytes_with_options(data, options);
        parser.source_name = super::source_name(path);
        Ok(parser)
    }

    /// Parse a DOCX from bytes.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX from bytes with custom options.
    pub fn from_bytes_with_options(data: impl Into<Vec<u8>>, options: ParseOptions) -> Self {
        Self {
            data: data.into(),
            source_name: None,
            options,
        }
    }

    /// Parse a DOCX from a reader.
    pub fn from_reader<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes_with_options(data, options))
    }

    /// Parse the document and return a structured Document.
    pub fn parse(&self) -> Result<Document> {
        let xml = self.read_document_part()?;
        let paragraphs = parse_document_xml(&xml, &self.options)?;

        let mut document = Document::from_paragraphs(SourceFormat::Docx, paragraphs);
        document.metadata.source_name = self.source_name.clone();

        log::debug!(
            "Parsed {} paragraphs with {} runs",
            document.paragraph_count(),
            document.run_count()
        );
        Ok(document)
    }

    fn read_document_part(&self) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(self.data.as_slice()))?;
        let mut entry = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => {
                Error::Docx(format!("missing {}", DOCUMENT_PART))
            }
            other => Error::from(other),
        })?;

        let mut xml = Vec::with_capacity(preallocation_hint(entry.size()));
        entry.read_to_end(&mut xml)?;
        Ok(xml)
    }
}

/// Extract body paragraphs from WordprocessingML markup.
///
/// Only paragraphs that are direct children of `w:body` are read; table
/// cells, text boxes and headers are outside the model.
pub fn parse_document_xml(xml: &[u8], options: &ParseOptions) -> Result<Vec<Paragraph>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut body = BodyReader::new(options.include_hyperlink_runs);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                body.element(e, false);
                body.stack.push(e.local_name().as_ref().to_vec());
            }
            Ok(Event::Empty(ref e)) => body.element(e, true),
            Ok(Event::Text(t)) => {
                if body.in_text {
                    let text = match t.unescape() {
                        Ok(text) => text,
                        Err(e) if options.is_lenient() => {
                            log::warn!("Keeping raw text after unescape failure: {}", e);
                            String::from_utf8_lossy(&t)
                        }
                        Err(e) => return Err(e.into()),
                    };
                    body.push_text(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                body.stack.pop();
                body.end_element(e.local_name().as_ref());
            }
            Ok(Event::Eof) => break,
            Err(e) if options.is_lenient() => {
                log::warn!(
                    "Malformed document markup at byte {}, keeping {} paragraphs: {}",
                    reader.buffer_position(),
                    body.paragraphs.len(),
                    e
                );
                break;
            }
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(body.paragraphs)
}

/// Paragraph under construction.
struct OpenParagraph {
    /// Stack depth of the `w:p` element
    depth: usize,
    runs: Vec<TextRun>,
    alignment: Alignment,
}

/// Run under construction.
struct OpenRun {
    /// Stack depth of the `w:r` element
    depth: usize,
    text: String,
    style: TextStyle,
}

/// Streaming state while walking `word/document.xml`.
///
/// `stack` holds the local names of the open ancestors of the element
/// being handled, so an element's own depth is `stack.len()`.
struct BodyReader {
    stack: Vec<Vec<u8>>,
    paragraph: Option<OpenParagraph>,
    run: Option<OpenRun>,
    in_text: bool,
    include_hyperlink_runs: bool,
    paragraphs: Vec<Paragraph>,
}

impl BodyReader {
    fn new(include_hyperlink_runs: bool) -> Self {
        Self {
            stack: Vec::new(),
            paragraph: None,
            run: None,
            in_text: false,
            include_hyperlink_runs,
            paragraphs: Vec::new(),
        }
    }

    fn parent_is(&self, name: &[u8]) -> bool {
        self.stack.last().is_some_and(|n| n.as_slice() == name)
    }

    /// Handle an opening or self-closing element.
    fn element(&mut self, e: &BytesStart, empty: bool) {
        let depth = self.stack.len();
        let name = e.local_name();

        match name.as_ref() {
            b"p" if self.paragraph.is_none() && self.parent_is(b"body") => {
                self.paragraph = Some(OpenParagraph {
                    depth,
                    runs: Vec::new(),
                    alignment: Alignment::Justify,
                });
                if empty {
                    self.finish_paragraph();
                }
            }
            b"jc" => {
                let in_ppr = self.parent_is(b"pPr");
                if let Some(ref mut para) = self.paragraph {
                    if in_ppr && depth == para.depth + 2 {
                        if let Some(value) = val_attribute(e) {
                            para.alignment = Alignment::from_jc(&value);
                        }
                    }
                }
            }
            b"r" if self.run.is_none() && self.is_run_position(depth) => {
                self.run = Some(OpenRun {
                    depth,
                    text: String::new(),
                    style: TextStyle::default(),
                });
                if empty {
                    self.finish_run();
                }
            }
            b"b" | b"i" | b"u" => {
                let in_rpr = self.parent_is(b"rPr");
                if let Some(ref mut run) = self.run {
                    if in_rpr && depth == run.depth + 2 {
                        let value = val_attribute(e);
                        match name.as_ref() {
                            b"b" => run.style.bold = toggle_value(value.as_deref()),
                            b"i" => run.style.italic = toggle_value(value.as_deref()),
                            _ => run.style.underline = underline_value(value.as_deref()),
                        }
                    }
                }
            }
            b"t" if !empty && self.is_run_child(depth) => self.in_text = true,
            b"tab" if self.is_run_child(depth) => self.push_text("\t"),
            b"br" | b"cr" if self.is_run_child(depth) => self.push_text("\n"),
            _ => {}
        }
    }

    /// Handle a closing element. The stack is already popped.
    fn end_element(&mut self, name: &[u8]) {
        let depth = self.stack.len();
        match name {
            b"t" => self.in_text = false,
            b"r" if self.run.as_ref().is_some_and(|r| r.depth == depth) => self.finish_run(),
            b"p" if self.paragraph.as_ref().is_some_and(|p| p.depth == depth) => {
                self.finish_paragraph()
            }
            _ => {}
        }
    }

    /// Whether a `w:r` at `depth` belongs to the open paragraph.
    fn is_run_position(&self, depth: usize) -> bool {
        let Some(ref para) = self.paragraph else {
            return false;
        };
        if depth == para.depth + 1 {
            return true;
        }
        self.include_hyperlink_runs
            && depth == para.depth + 2
            && self.parent_is(b"hyperlink")
    }

    fn is_run_child(&self, depth: usize) -> bool {
        self.run.as_ref().is_some_and(|r| depth == r.depth + 1)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(ref mut run) = self.run {
            run.text.push_str(text);
        }
    }

    fn finish_run(&mut self) {
        self.in_text = false;
        if let (Some(run), Some(para)) = (self.run.take(), self.paragraph.as_mut()) {
            para.runs.push(TextRun::styled(run.text, run.style));
        }
    }

    fn finish_paragraph(&mut self) {
        if self.run.is_some() {
            self.finish_run();
        }
        if let Some(para) = self.paragraph.take() {
            self.paragraphs
                .push(Paragraph::rich_aligned(para.runs, para.alignment));
        }
    }
}

/// Capacity to reserve for an entry. The declared size comes from the
/// archive and is only a hint; `read_to_end` grows past it if needed.
fn preallocation_hint(declared: u64) -> usize {
    usize::try_from(declared)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATION)
}

/// Read the `w:val` attribute of an element, ignoring the namespace prefix.
fn val_attribute(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"val")
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Interpret an on/off property such as `w:b`. A missing value means on.
fn toggle_value(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "off"
        ),
    }
}

/// Interpret `w:u`. Every underline kind except `none` counts as underlined.
fn underline_value(value: Option<&str>) -> bool {
    match value {
        Some(v) if v.trim().eq_ignore_ascii_case("none") => false,
        other => toggle_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preallocation_hint_is_capped() {
        assert_eq!(preallocation_hint(4096), 4096);
        assert_eq!(preallocation_hint(u64::MAX), MAX_PREALLOCATION);
        assert_eq!(
            preallocation_hint(MAX_PREALLOCATION as u64 + 1),
            MAX_PREALLOCATION
        );
    }

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            inner
        )
    }

    fn parse(inner: &str) -> Vec<Paragraph> {
        parse_document_xml(body(inner).as_bytes(), &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_runs_and_flags() {
        let paras = parse(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Hi</w:t></w:r><w:r><w:rPr><w:b/><w:i/></w:rPr><w:t xml:space="preserve"> there</w:t></w:r></w:p>"#,
        );

        assert_eq!(paras.len(), 1);
        assert_eq!(
            paras[0],
            Paragraph::rich(vec![
                TextRun::bold("Hi"),
                TextRun::styled(" there", TextStyle::new(true, true, false)),
            ])
        );
    }

    #[test]
    fn test_explicit_off_values() {
        let paras = parse(
            r#"<w:p><w:r><w:rPr><w:b w:val="0"/><w:i w:val="false"/><w:u w:val="none"/></w:rPr><w:t>plain</w:t></w:r><w:r><w:rPr><w:u w:val="double"/></w:rPr><w:t>under</w:t></w:r></w:p>"#,
        );

        let runs = paras[0].runs();
        assert_eq!(runs[0].style, TextStyle::PLAIN);
        assert_eq!(runs[1].style, TextStyle::UNDERLINE);
    }

    #[test]
    fn test_alignment() {
        let paras = parse(
            r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>R</w:t></w:r></w:p><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>C</w:t></w:r></w:p>"#,
        );

        assert_eq!(paras[0].alignment(), Alignment::Right);
        assert_eq!(paras[1].alignment(), Alignment::Justify);
    }

    #[test]
    fn test_paragraph_mark_properties_ignored() {
        // rPr inside pPr styles the paragraph mark, not a run
        let paras = parse(
            r#"<w:p><w:pPr><w:rPr><w:b/></w:rPr></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#,
        );
        assert_eq!(paras[0].runs()[0].style, TextStyle::PLAIN);
    }

    #[test]
    fn test_empty_paragraphs() {
        let paras = parse(r#"<w:p/><w:p><w:pPr><w:jc w:val="right"/></w:pPr></w:p>"#);

        assert_eq!(paras.len(), 2);
        assert!(paras[0].runs().is_empty());
        assert!(paras[1].is_empty());
    }

    #[test]
    fn test_tabs_and_breaks() {
        let paras = parse(r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#);
        assert_eq!(paras[0].plain_text(), "a\tb\nc");
    }

    #[test]
    fn test_entities_unescaped() {
        let paras = parse(r#"<w:p><w:r><w:t>a &amp; b &lt;c&gt;</w:t></w:r></w:p>"#);
        assert_eq!(paras[0].plain_text(), "a & b <c>");
    }

    #[test]
    fn test_hyperlink_runs() {
        let xml = r#"<w:p><w:r><w:t>see </w:t></w:r><w:hyperlink r:id="rId5"><w:r><w:rPr><w:u w:val="single"/></w:rPr><w:t>here</w:t></w:r></w:hyperlink></w:p>"#;

        let paras = parse(xml);
        assert_eq!(paras[0].runs().len(), 2);
        assert_eq!(paras[0].runs()[1], TextRun::underline("here"));

        let options = ParseOptions::new().with_hyperlink_runs(false);
        let paras = parse_document_xml(body(xml).as_bytes(), &options).unwrap();
        assert_eq!(paras[0].plain_text(), "see ");
    }

    #[test]
    fn test_table_paragraphs_skipped() {
        let paras = parse(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );

        let texts: Vec<String> = paras.iter().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["before", "after"]);
    }

    #[test]
    fn test_malformed_markup() {
        let xml = body(r#"<w:p><w:r><w:t>ok</w:t></w:r></w:p><w:p><w:r></w:p>"#);

        let strict = parse_document_xml(xml.as_bytes(), &ParseOptions::default());
        assert!(matches!(strict, Err(Error::Xml(_))));

        let lenient = parse_document_xml(xml.as_bytes(), &ParseOptions::new().lenient()).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient[0].plain_text(), "ok");
    }

    #[test]
    fn test_toggle_values() {
        assert!(toggle_value(None));
        assert!(toggle_value(Some("1")));
        assert!(toggle_value(Some("true")));
        assert!(!toggle_value(Some("off")));
        assert!(!underline_value(Some("none")));
        assert!(underline_value(Some("wave")));
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxParser::from_bytes(b"plain text".to_vec()).parse();
        assert!(matches!(result, Err(Error::Docx(_))));
    }
}
