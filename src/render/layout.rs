//! Layout formatting: configuration to CSS style strings.

use crate::config::{ConfigMap, LayoutConfig, MarginConfig};
use crate::error::Result;

/// Width value that means "full width" and produces no directive.
const FULL_WIDTH: u32 = 100;

/// Style strings for the container and block tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutStyles {
    /// Style of the `<div>` container
    pub container_style: String,

    /// Style of each `<p>` block
    pub block_style: String,
}

impl LayoutStyles {
    /// Format the styles for a layout configuration.
    pub fn from_config(config: &LayoutConfig) -> Self {
        format_layout(config)
    }

    /// Format the styles from a raw key/value map.
    ///
    /// Fails with a configuration error when a key is missing or invalid.
    pub fn from_map(map: &ConfigMap) -> Result<Self> {
        Ok(format_layout(&LayoutConfig::from_map(map)?))
    }
}

/// Format container and block styles.
///
/// The container gets the `div` margins, the first-line indent and the
/// width; blocks get the `p` margins. Directives are separated by a single
/// space.
pub fn format_layout(config: &LayoutConfig) -> LayoutStyles {
    let container = [
        margin_style(&config.div_margin),
        indent_style(config.text_indent, &config.text_indent_units),
        width_style(config.width, &config.width_units),
    ];

    LayoutStyles {
        container_style: join_directives(&container),
        block_style: margin_style(&config.p_margin),
    }
}

/// `margin` directive using the shortest CSS shorthand.
///
/// Any zero side suppresses the directive entirely.
pub fn margin_style(margin: &MarginConfig) -> String {
    let MarginConfig {
        top,
        right,
        bottom,
        left,
        ref units,
    } = *margin;

    if [top, right, bottom, left].iter().any(|v| *v == 0.0) {
        return String::new();
    }

    let side = |v: f64| format!("{}{}", v, units);
    if top == right && right == bottom && bottom == left {
        format!("margin: {};", side(top))
    } else if top == bottom && right == left {
        format!("margin: {} {};", side(top), side(right))
    } else if right == left {
        format!("margin: {} {} {};", side(top), side(right), side(bottom))
    } else {
        format!(
            "margin: {} {} {} {};",
            side(top),
            side(right),
            side(bottom),
            side(left)
        )
    }
}

/// `text-indent` directive, empty for a zero indent.
pub fn indent_style(indent: f64, units: &str) -> String {
    if indent == 0.0 {
        String::new()
    } else {
        format!("text-indent: {}{};", indent, units)
    }
}

/// `width` directive, empty at full width.
pub fn width_style(width: u32, units: &str) -> String {
    if width == FULL_WIDTH {
        String::new()
    } else {
        format!("width: {}{};", width, units)
    }
}

fn join_directives(directives: &[String]) -> String {
    directives
        .iter()
        .filter(|d| !d.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
