//! Document-level rendering properties.

use dochtml::render::{
    tag_events, to_fragments, HtmlRenderer, InlineTag, RenderOptions, TagEvent, CONTAINER_CLOSE,
};
use dochtml::{Alignment, Document, LayoutConfig, MarginConfig, Paragraph, SourceFormat, TextRun};

fn sample_document() -> Document {
    Document::from_paragraphs(
        SourceFormat::Docx,
        vec![
            Paragraph::rich(vec![TextRun::bold("A"), TextRun::new("B")]),
            Paragraph::rich(vec![TextRun::underline("")]),
            Paragraph::rich_aligned(
                vec![TextRun::italic("x"), TextRun::bold("y"), TextRun::italic("z")],
                Alignment::Right,
            ),
            Paragraph::text("   "),
            Paragraph::text("plain"),
        ],
    )
}

#[test]
fn test_one_unit_per_paragraph_in_order() {
    let doc = sample_document();
    let html = to_fragments(&doc, &RenderOptions::default()).unwrap();
    let renderer = HtmlRenderer::default();

    let fragments = html.fragments();
    assert_eq!(fragments.len(), doc.paragraph_count() + 2);
    assert_eq!(fragments[0], renderer.container_open());
    assert_eq!(fragments[fragments.len() - 1], CONTAINER_CLOSE);

    for (fragment, paragraph) in fragments[1..fragments.len() - 1].iter().zip(&doc.paragraphs) {
        assert_eq!(fragment, &renderer.render_paragraph(paragraph));
    }
    assert_eq!(fragments[1], "<p align='justify'><b>A</b>B</p>");
    assert_eq!(fragments[2], renderer.section_break());
    assert_eq!(fragments[3], "<p align='right'><i>x</i><b>y</b><i>z</i></p>");
    assert_eq!(fragments[4], renderer.section_break());
}

#[test]
fn test_tags_balanced_across_document() {
    let doc = sample_document();
    for paragraph in &doc.paragraphs {
        let mut stack: Vec<InlineTag> = Vec::new();
        for event in tag_events(paragraph.runs()) {
            match event {
                TagEvent::Open(tag) => stack.push(tag),
                TagEvent::Close(tag) => assert_eq!(stack.pop(), Some(tag)),
                TagEvent::Text(_) => {}
            }
        }
        assert!(stack.is_empty());
    }
}

#[test]
fn test_layout_styles_reach_every_tag() {
    let layout = LayoutConfig::default()
        .with_width(90, "%")
        .with_p_margin(MarginConfig::new(5.0, 10.0, 5.0, 10.0, "px"))
        .with_div_margin(MarginConfig::new(1.0, 2.0, 3.0, 2.0, "em"));
    let doc = Document::from_paragraphs(
        SourceFormat::Text,
        vec![Paragraph::text("a"), Paragraph::text(""), Paragraph::text("b")],
    );

    let html = to_fragments(&doc, &RenderOptions::new().with_layout(layout))
        .unwrap()
        .to_string();

    let open = "<div align='justify' style='margin: 1em 2em 3em; width: 90%;'>";
    let block = "<p align='justify' style='margin: 5px 10px;'>";
    assert_eq!(
        html,
        format!("{open}{block}a</p></div>{open}{block}b</p></div>")
    );
}
