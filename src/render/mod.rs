//! Rendering module for converting documents to HTML fragments.

mod html;
mod json;
pub mod layout;
mod options;
pub mod reconcile;

pub use html::{to_fragments, to_html, HtmlDocument, HtmlRenderer, BLOCK_CLOSE, CONTAINER_CLOSE};
pub use json::{to_json, JsonFormat};
pub use layout::{format_layout, LayoutStyles};
pub use options::RenderOptions;
pub use reconcile::{reconcile, tag_events, InlineTag, TagEvent};
