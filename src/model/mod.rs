//! Document model types.
//!
//! This module defines the in-memory representation that the assembler
//! builds and the writer serializes: a style registry plus an ordered
//! sequence of content blocks.

mod block;
mod document;
mod paragraph;
mod style;
mod table;

pub use block::{Block, Equation, Heading};
pub use document::{Document, Metadata};
pub use paragraph::{Emphasis, Paragraph, TextRun};
pub use style::{
    inches, style_id, Alignment, FontSpec, ParagraphSpec, Style, StyleRegistry, EQUATION,
    LIST_BULLET, NORMAL, POINTS_PER_INCH,
};
pub use table::{row, Table};
