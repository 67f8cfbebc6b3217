//! Rendering module for converting documents to output formats.

mod docx;
mod json;
mod options;
mod package;
mod text;
pub(crate) mod xml;

pub use json::{to_json, JsonFormat};
pub use options::{Compression, PageSetup, WriteOptions};
pub use package::{package_parts, to_docx, write_file, CORE_PART, DOCUMENT_PART, STYLES_PART};
pub use text::{outline, to_text};
