//! Parsing options and configuration.

/// Encoding used for text files that are not valid UTF-8.
pub const DEFAULT_FALLBACK_ENCODING: &str = "windows-1251";

/// Options for parsing source documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Encoding label forced for text sources (None = detect)
    pub encoding: Option<String>,

    /// Encoding label used when a text source is not valid UTF-8
    pub fallback_encoding: String,

    /// Whether runs nested in DOCX hyperlinks are part of the paragraph
    pub include_hyperlink_runs: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep what was read before malformed content).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Force the encoding of text sources.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Set the encoding tried when a text source is not valid UTF-8.
    pub fn with_fallback_encoding(mut self, label: impl Into<String>) -> Self {
        self.fallback_encoding = label.into();
        self
    }

    /// Include or skip runs nested in hyperlinks.
    pub fn with_hyperlink_runs(mut self, include: bool) -> Self {
        self.include_hyperlink_runs = include;
        self
    }

    pub(crate) fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            encoding: None,
            fallback_encoding: DEFAULT_FALLBACK_ENCODING.to_string(),
            include_hyperlink_runs: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}
