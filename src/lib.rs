//! # docxgen
//!
//! Sequential assembly of styled WordprocessingML (.docx) documents.
//!
//! Styles are registered up front, then paragraphs, headings, tables and
//! numbered equations are appended in order. Every append is validated
//! against the style registry, and the finished document is written as a
//! deterministic OPC package.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxgen::{DocumentAssembler, Style, FontSpec, TextRun};
//!
//! fn main() -> docxgen::Result<()> {
//!     let mut asm = DocumentAssembler::new();
//!     asm.register_style(Style::new("Caption").with_font(FontSpec::new("Times New Roman", 8.0)))?;
//!
//!     asm.append_heading(1, "Introduction")?;
//!     asm.append_paragraph("Normal", [TextRun::bold("Abstract—"), TextRun::new("text")])?;
//!     asm.append_table("Caption", "TABLE I", ["A", "B"], [["x", "y"]])?;
//!     asm.append_equation("E=mc^2", 1)?;
//!
//!     asm.save("article.docx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Style registry**: named paragraph styles with font and spacing
//! - **Validated blocks**: unknown styles and ragged tables are rejected
//! - **IEEE article layer**: presets plus a JSON article manifest
//! - **Round trip**: generated packages can be read back into the model
//! - **Atomic output**: a failed save never leaves a partial file

pub mod article;
pub mod assembler;
pub mod error;
pub mod model;
pub mod reader;
pub mod render;

// Re-export commonly used types
pub use article::{Article, Item, LeadEmphasis, Section, SMECI_OUTPUT};
pub use assembler::{AssemblerOptions, DocumentAssembler, DuplicateStylePolicy};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, Document, Emphasis, Equation, FontSpec, Heading, Metadata, Paragraph,
    ParagraphSpec, Style, StyleRegistry, Table, TextRun,
};
pub use reader::{read_bytes, read_file, DocxReader};
pub use render::{Compression, JsonFormat, PageSetup, WriteOptions};

use std::path::Path;

/// Build the bundled SMECI article and save it.
///
/// # Example
///
/// ```no_run
/// let doc = docxgen::build_article(docxgen::SMECI_OUTPUT)?;
/// println!("Blocks: {}", doc.block_count());
/// # Ok::<(), docxgen::Error>(())
/// ```
pub fn build_article<P: AsRef<Path>>(path: P) -> Result<Document> {
    Docxgen::new().build(&Article::smeci()?, path)
}

/// Read a generated file and render its block outline.
pub fn outline<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = read_file(path)?;
    Ok(render::outline(&doc))
}

/// Read a generated file and convert it to JSON.
///
/// # Example
///
/// ```no_run
/// use docxgen::{to_json, JsonFormat};
///
/// let json = to_json("article.docx", JsonFormat::Pretty).unwrap();
/// std::fs::write("article.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = read_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for turning article manifests into packages.
///
/// # Example
///
/// ```no_run
/// use docxgen::{Article, Docxgen};
///
/// let article = Article::from_file("article.json")?;
/// let doc = Docxgen::new()
///     .overwrite_styles()
///     .stored()
///     .build(&article, "article.docx")?;
/// # Ok::<(), docxgen::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docxgen {
    assembler_options: AssemblerOptions,
    write_options: WriteOptions,
}

impl Docxgen {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace earlier registrations of a style name instead of failing.
    pub fn overwrite_styles(mut self) -> Self {
        self.assembler_options = self.assembler_options.overwrite_styles();
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.assembler_options = self.assembler_options.with_metadata(metadata);
        self
    }

    /// Store package entries without compression.
    pub fn stored(mut self) -> Self {
        self.write_options = self.write_options.stored();
        self
    }

    /// Set the page geometry; the equation tab stop follows its text width.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.write_options = self.write_options.with_page(page);
        self
    }

    /// Get the assembler options.
    pub fn assembler_options(&self) -> &AssemblerOptions {
        &self.assembler_options
    }

    /// Get the write options.
    pub fn write_options(&self) -> &WriteOptions {
        &self.write_options
    }

    /// Assemble an article without writing it.
    pub fn assemble(&self, article: &Article) -> Result<DocumentAssembler> {
        article.assemble(self.assembler_options.clone())
    }

    /// Assemble an article into in-memory package bytes.
    pub fn to_bytes(&self, article: &Article) -> Result<Vec<u8>> {
        self.assemble(article)?.to_bytes(&self.write_options)
    }

    /// Assemble an article and save it to `path`.
    pub fn build<P: AsRef<Path>>(&self, article: &Article, path: P) -> Result<Document> {
        self.assemble(article)?
            .save_with_options(path, &self.write_options)
    }
}
