//! Layout configuration.
//!
//! The layout of the generated HTML (margins, first-line indent, width) is
//! read from a configuration file. Two formats are accepted:
//!
//! - INI in the configparser dialect, with flat keys such as
//!   `p-margin-top` or `width-units`. Keys in `[DEFAULT]` apply to every
//!   section and a selected section overrides them.
//! - JSON matching the serde form of [`LayoutConfig`].
//!
//! ```
//! use dochtml::config::LayoutConfig;
//!
//! let ini = "\
//! [DEFAULT]
//! width = 80
//! width-units = %%
//! text-indent = 1.5
//! text-indent-units = em
//! p-margin-top = 0
//! p-margin-right = 0
//! p-margin-bottom = 0
//! p-margin-left = 0
//! p-margin-units = px
//! div-margin-top = 10
//! div-margin-right = 10
//! div-margin-bottom = 10
//! div-margin-left = 10
//! div-margin-units = px
//! ";
//! let config = LayoutConfig::from_ini_str(ini, None)?;
//! assert_eq!(config.width, 80);
//! assert_eq!(config.div_margin.top, 10.0);
//! # Ok::<(), dochtml::Error>(())
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Name of the section whose values every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Flat key/value view of one configuration section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMap {
    values: HashMap<String, String>,
}

impl ConfigMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Keys are case-insensitive.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values.insert(key.as_ref().trim().to_lowercase(), value.into());
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Look up a value that must be present.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::MissingConfigKey(key.to_string()))
    }

    /// Look up and parse a value that must be present.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.require(key)?;
        raw.trim().parse().map_err(|_| Error::InvalidConfigValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse INI text and return the values visible in one section.
    ///
    /// With `section == None` only `[DEFAULT]` is read. A named section
    /// starts from the defaults and overrides them. Values are then
    /// interpolated: `%%` is a literal `%` and `%(key)s` is replaced by
    /// another key of the same view. Any other `%` is an error.
    pub fn from_ini_str(text: &str, section: Option<&str>) -> Result<Self> {
        let sections = parse_ini(text)?;
        let mut map = sections.get(DEFAULT_SECTION).cloned().unwrap_or_default();

        if let Some(name) = section.filter(|name| *name != DEFAULT_SECTION) {
            let overrides = sections
                .get(name)
                .ok_or_else(|| Error::Config(format!("section [{}] not found", name)))?;
            map.values
                .extend(overrides.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let raw = map.clone();
        for (key, value) in map.values.iter_mut() {
            let expanded = interpolate(&raw, key, value, 1)?;
            *value = expanded;
        }

        Ok(map)
    }
}

/// Deepest chain of `%(key)s` references followed before giving up.
const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Expand `%%` and `%(key)s` in one value.
fn interpolate(map: &ConfigMap, key: &str, value: &str, depth: usize) -> Result<String> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(Error::Config(format!(
            "references from `{}` nest deeper than {} levels",
            key, MAX_INTERPOLATION_DEPTH
        )));
    }
    let invalid = || Error::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
    };

    let mut output = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('%') {
        output.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        if let Some(after) = tail.strip_prefix('%') {
            output.push('%');
            rest = after;
        } else if let Some(reference) = tail.strip_prefix('(') {
            let close = reference.find(")s").ok_or_else(invalid)?;
            let name = reference[..close].trim().to_lowercase();
            let target = map.get(&name).ok_or_else(|| {
                Error::Config(format!("`{}` refers to missing key `{}`", key, name))
            })?;
            output.push_str(&interpolate(map, &name, target, depth + 1)?);
            rest = &reference[close + 2..];
        } else {
            return Err(invalid());
        }
    }
    output.push_str(rest);
    Ok(output)
}

/// Split INI text into sections.
fn parse_ini(text: &str) -> Result<HashMap<String, ConfigMap>> {
    let mut sections: HashMap<String, ConfigMap> = HashMap::new();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        // Indented lines continue the previous value.
        if raw_line.starts_with(char::is_whitespace) {
            if let (Some(section), Some(key)) = (current.as_ref(), last_key.as_ref()) {
                if let Some(value) = sections
                    .get_mut(section)
                    .and_then(|map| map.values.get_mut(key))
                {
                    value.push('\n');
                    value.push_str(line);
                    continue;
                }
            }
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            last_key = None;
            continue;
        }

        let section = current.as_ref().ok_or_else(|| {
            Error::Config(format!(
                "line {}: key outside of any [section] header",
                line_no
            ))
        })?;

        let split_at = line
            .find(|c| c == '=' || c == ':')
            .ok_or_else(|| Error::Config(format!("line {}: expected `key = value`", line_no)))?;
        let key = line[..split_at].trim().to_lowercase();
        let value = line[split_at + 1..].trim();
        if key.is_empty() {
            return Err(Error::Config(format!("line {}: empty key", line_no)));
        }

        sections
            .entry(section.clone())
            .or_default()
            .insert(&key, value);
        last_key = Some(key);
    }

    Ok(sections)
}

/// Margins for one HTML tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
    /// CSS units for all four values
    pub units: String,
}

impl MarginConfig {
    /// Create margins with all four sides set.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64, units: impl Into<String>) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
            units: units.into(),
        }
    }

    /// Create margins with the same value on every side.
    pub fn uniform(value: f64, units: impl Into<String>) -> Self {
        Self::new(value, value, value, value, units)
    }

    /// Read `<tag>-margin-{top,right,bottom,left,units}` from a map.
    pub fn from_map(map: &ConfigMap, tag: &str) -> Result<Self> {
        Ok(Self {
            top: map.parse(&format!("{}-margin-top", tag))?,
            right: map.parse(&format!("{}-margin-right", tag))?,
            bottom: map.parse(&format!("{}-margin-bottom", tag))?,
            left: map.parse(&format!("{}-margin-left", tag))?,
            units: map.require(&format!("{}-margin-units", tag))?.to_string(),
        })
    }
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self::uniform(0.0, "px")
    }
}

/// Layout settings for the generated HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Container width; 100 means no width directive
    pub width: u32,

    /// Units for the width
    pub width_units: String,

    /// First-line indent; zero means no indent directive
    pub text_indent: f64,

    /// Units for the indent
    pub text_indent_units: String,

    /// Margins of each `<p>` block
    pub p_margin: MarginConfig,

    /// Margins of the `<div>` container
    pub div_margin: MarginConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 100,
            width_units: "%".to_string(),
            text_indent: 0.0,
            text_indent_units: "em".to_string(),
            p_margin: MarginConfig::default(),
            div_margin: MarginConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Build a layout from a flat key/value map. Every key is required.
    pub fn from_map(map: &ConfigMap) -> Result<Self> {
        Ok(Self {
            width: map.parse("width")?,
            width_units: map.require("width-units")?.to_string(),
            text_indent: map.parse("text-indent")?,
            text_indent_units: map.require("text-indent-units")?.to_string(),
            p_margin: MarginConfig::from_map(map, "p")?,
            div_margin: MarginConfig::from_map(map, "div")?,
        })
    }

    /// Parse INI text, reading `[DEFAULT]` or the given section.
    pub fn from_ini_str(text: &str, section: Option<&str>) -> Result<Self> {
        Self::from_map(&ConfigMap::from_ini_str(text, section)?)
    }

    /// Parse JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("invalid JSON: {}", e)))
    }

    /// Load a configuration file. `.json` files are read as JSON, anything
    /// else as INI.
    pub fn from_path<P: AsRef<Path>>(path: P, section: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        log::debug!("Loading layout configuration from {}", path.display());
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_ini_str(&text, section)
        }
    }

    /// Set the container width.
    pub fn with_width(mut self, width: u32, units: impl Into<String>) -> Self {
        self.width = width;
        self.width_units = units.into();
        self
    }

    /// Set the first-line indent.
    pub fn with_text_indent(mut self, indent: f64, units: impl Into<String>) -> Self {
        self.text_indent = indent;
        self.text_indent_units = units.into();
        self
    }

    /// Set the paragraph margins.
    pub fn with_p_margin(mut self, margin: MarginConfig) -> Self {
        self.p_margin = margin;
        self
    }

    /// Set the container margins.
    pub fn with_div_margin(mut self, margin: MarginConfig) -> Self {
        self.div_margin = margin;
        self
    }
}
