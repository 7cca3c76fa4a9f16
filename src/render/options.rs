//! Rendering options and configuration.

use crate::config::LayoutConfig;

/// Options for rendering document content.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Layout driving the container and block styles
    pub layout: LayoutConfig,

    /// Text inserted between output fragments when joining them
    pub separator: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the fragment separator (e.g. `"\n"` for one fragment per line).
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_layout(LayoutConfig::default().with_width(90, "%"))
            .with_separator("\n");

        assert_eq!(options.layout.width, 90);
        assert_eq!(options.separator, "\n");
    }

    #[test]
    fn test_default_joins_without_separator() {
        assert!(RenderOptions::default().separator.is_empty());
    }
}
