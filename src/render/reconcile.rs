//! Run-tag reconciliation.
//!
//! Turns the style flags of a paragraph's runs into inline `<b>`, `<i>` and
//! `<u>` tags. Tags change only at run boundaries where the style changes,
//! and at every point of the output the open tags are exactly the flags of
//! the run being emitted.
//!
//! At each boundary closes come first, then opens. Tags open in the fixed
//! order bold, italic, underline and close innermost first. The open tags
//! are kept as a stack: when a tag has to close while a tag opened after it
//! stays on, the later tag is closed too and reopened right away, so the
//! output always nests correctly.
//!
//! Runs with empty text still take part in the comparison. They can close
//! and reopen tags around a zero-length span.
//!
//! ```
//! use dochtml::model::{TextRun, TextStyle};
//! use dochtml::render::reconcile;
//!
//! let runs = vec![
//!     TextRun::bold("Hi"),
//!     TextRun::styled(" there", TextStyle::new(true, true, false)),
//! ];
//! assert_eq!(reconcile(&runs), "<b>Hi<i> there</i></b>");
//! ```

use crate::model::{TextRun, TextStyle};

/// An inline formatting tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineTag {
    /// `<b>`
    Bold,
    /// `<i>`
    Italic,
    /// `<u>`
    Underline,
}

impl InlineTag {
    /// Opening priority, outermost first.
    pub const ORDER: [InlineTag; 3] = [InlineTag::Bold, InlineTag::Italic, InlineTag::Underline];

    /// Whether the style sets this tag's flag.
    pub fn is_set(self, style: &TextStyle) -> bool {
        match self {
            InlineTag::Bold => style.bold,
            InlineTag::Italic => style.italic,
            InlineTag::Underline => style.underline,
        }
    }

    /// Opening markup.
    pub fn open(self) -> &'static str {
        match self {
            InlineTag::Bold => "<b>",
            InlineTag::Italic => "<i>",
            InlineTag::Underline => "<u>",
        }
    }

    /// Closing markup.
    pub fn close(self) -> &'static str {
        match self {
            InlineTag::Bold => "</b>",
            InlineTag::Italic => "</i>",
            InlineTag::Underline => "</u>",
        }
    }
}

/// One step of a reconciled paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEvent<'a> {
    /// Open a tag
    Open(InlineTag),
    /// Close a tag
    Close(InlineTag),
    /// Emit run text
    Text(&'a str),
}

impl<'a> TagEvent<'a> {
    /// Markup or text for this event.
    pub fn as_str(&self) -> &'a str {
        match *self {
            TagEvent::Open(tag) => tag.open(),
            TagEvent::Close(tag) => tag.close(),
            TagEvent::Text(text) => text,
        }
    }
}

/// Compute the ordered tag events for a paragraph's runs.
pub fn tag_events(runs: &[TextRun]) -> Vec<TagEvent<'_>> {
    let mut events = Vec::with_capacity(runs.len() * 2 + 3);
    let mut open: Vec<InlineTag> = Vec::with_capacity(InlineTag::ORDER.len());

    for run in runs {
        transition(&mut open, &run.style, &mut events);
        events.push(TagEvent::Text(&run.text));
    }
    transition(&mut open, &TextStyle::PLAIN, &mut events);

    events
}

/// Move the open-tag stack to `next`, recording closes then opens.
fn transition<'a>(open: &mut Vec<InlineTag>, next: &TextStyle, events: &mut Vec<TagEvent<'a>>) {
    let keep = open.iter().take_while(|tag| tag.is_set(next)).count();
    events.extend(open.drain(keep..).rev().map(TagEvent::Close));

    for tag in InlineTag::ORDER {
        if tag.is_set(next) && !open.contains(&tag) {
            open.push(tag);
            events.push(TagEvent::Open(tag));
        }
    }
}

/// Reconcile a paragraph's runs into one inline string.
///
/// Zero runs give an empty string. Run text is not escaped.
pub fn reconcile(runs: &[TextRun]) -> String {
    let events = tag_events(runs);
    let len = events.iter().map(|e| e.as_str().len()).sum();
    let mut output = String::with_capacity(len);
    for event in &events {
        output.push_str(event.as_str());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(bold: bool, italic: bool, underline: bool) -> TextStyle {
        TextStyle::new(bold, italic, underline)
    }

    /// Check nesting and that the open tags match each run's flags.
    fn assert_consistent(runs: &[TextRun]) {
        let mut stack: Vec<InlineTag> = Vec::new();
        let mut run_index = 0;

        for event in tag_events(runs) {
            match event {
                TagEvent::Open(tag) => {
                    assert!(!stack.contains(&tag), "{:?} opened twice", tag);
                    stack.push(tag);
                }
                TagEvent::Close(tag) => {
                    assert_eq!(stack.pop(), Some(tag), "mis-nested close of {:?}", tag);
                }
                TagEvent::Text(_) => {
                    let expected = runs[run_index].style;
                    for tag in InlineTag::ORDER {
                        assert_eq!(stack.contains(&tag), tag.is_set(&expected));
                    }
                    run_index += 1;
                }
            }
        }

        assert!(stack.is_empty(), "unclosed tags: {:?}", stack);
        assert_eq!(run_index, runs.len());
    }

    #[test]
    fn test_zero_runs() {
        assert_eq!(reconcile(&[]), "");
        assert!(tag_events(&[]).is_empty());
    }

    #[test]
    fn test_plain_runs() {
        let runs = vec![TextRun::new("a"), TextRun::new("b")];
        assert_eq!(reconcile(&runs), "ab");
    }

    #[test]
    fn test_boundary_symmetry() {
        let runs = vec![TextRun::bold("A"), TextRun::new("B")];
        assert_eq!(reconcile(&runs), "<b>A</b>B");
    }

    #[test]
    fn test_nested_open() {
        let runs = vec![
            TextRun::bold("Hi"),
            TextRun::styled(" there", style(true, true, false)),
        ];
        assert_eq!(reconcile(&runs), "<b>Hi<i> there</i></b>");
    }

    #[test]
    fn test_identical_flags_single_open_and_close() {
        let all = style(true, true, true);
        let runs = vec![
            TextRun::styled("one ", all),
            TextRun::styled("two ", all),
            TextRun::styled("three", all),
        ];
        assert_eq!(reconcile(&runs), "<b><i><u>one two three</u></i></b>");
    }

    #[test]
    fn test_close_before_open_at_boundary() {
        let runs = vec![TextRun::italic("x"), TextRun::underline("y")];
        assert_eq!(reconcile(&runs), "<i>x</i><u>y</u>");
    }

    #[test]
    fn test_inner_tag_added_then_removed() {
        let runs = vec![
            TextRun::bold("a"),
            TextRun::styled("b", style(true, false, true)),
            TextRun::bold("c"),
        ];
        assert_eq!(reconcile(&runs), "<b>a<u>b</u>c</b>");
    }

    #[test]
    fn test_outer_tag_closed_under_inner() {
        // bold ends while italic continues: italic is closed and reopened
        let runs = vec![
            TextRun::styled("a", style(true, true, false)),
            TextRun::italic("b"),
        ];
        assert_eq!(reconcile(&runs), "<b><i>a</i></b><i>b</i>");
        assert_consistent(&runs);
    }

    #[test]
    fn test_outer_tag_opened_over_inner() {
        // italic already open when bold starts: bold nests inside italic
        let runs = vec![
            TextRun::italic("a"),
            TextRun::styled("b", style(true, true, false)),
            TextRun::italic("c"),
        ];
        assert_eq!(reconcile(&runs), "<i>a<b>b</b>c</i>");
        assert_consistent(&runs);
    }

    #[test]
    fn test_empty_text_run_participates() {
        let runs = vec![TextRun::bold("a"), TextRun::new(""), TextRun::bold("b")];
        assert_eq!(reconcile(&runs), "<b>a</b><b>b</b>");

        let runs = vec![TextRun::bold("")];
        assert_eq!(reconcile(&runs), "<b></b>");
    }

    #[test]
    fn test_text_not_escaped() {
        let runs = vec![TextRun::new("a < b & c")];
        assert_eq!(reconcile(&runs), "a < b & c");
    }

    #[test]
    fn test_all_style_sequences_well_formed() {
        let styles: Vec<TextStyle> = (0..8u8)
            .map(|bits| style(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0))
            .collect();

        for a in &styles {
            for b in &styles {
                for c in &styles {
                    let runs = vec![
                        TextRun::styled("x", *a),
                        TextRun::styled("y", *b),
                        TextRun::styled("z", *c),
                    ];
                    assert_consistent(&runs);
                }
            }
        }
    }

    #[test]
    fn test_events_for_single_run() {
        let runs = vec![TextRun::styled("t", style(false, true, true))];
        assert_eq!(
            tag_events(&runs),
            vec![
                TagEvent::Open(InlineTag::Italic),
                TagEvent::Open(InlineTag::Underline),
                TagEvent::Text("t"),
                TagEvent::Close(InlineTag::Underline),
                TagEvent::Close(InlineTag::Italic),
            ]
        );
    }
}
