//! Markdown editor with a formatting toolbar and a rendered preview.
//!
//! Formatting is pure text surgery on the Markdown source ([`format`]), so the
//! stored description is always plain Markdown and every toolbar action is
//! unit-tested without a browser.

mod component;
pub mod format;
mod render;

pub use component::RichTextEditor;
pub use format::{apply, EditHistory, Format, Selection};
pub use render::render_markdown;
