//! Document assembler.
//!
//! The assembler owns the document being built. Styles are registered first,
//! then blocks are appended in script order; every append validates the block
//! against the style registry before it is accepted, so a document can never
//! reference a style it does not define.

mod options;

pub use options::{AssemblerOptions, DuplicateStylePolicy};

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{
    Block, Document, Equation, Heading, Metadata, Paragraph, ParagraphSpec, Style, Table,
    TextRun, EQUATION, LIST_BULLET,
};
use crate::render::xml::{check_block, check_text};
use crate::render::{self, WriteOptions};

/// Highest heading level accepted by WordprocessingML outlines.
pub const MAX_HEADING_LEVEL: u8 = 9;

/// Sequential builder for a styled document.
///
/// # Example
///
/// ```no_run
/// use docxgen::{DocumentAssembler, TextRun};
///
/// let mut asm = DocumentAssembler::new();
/// asm.append_heading(1, "Introduction")?;
/// asm.append_paragraph("Normal", [TextRun::bold("Note:"), TextRun::new(" text")])?;
/// asm.append_table("Normal", "TABLE I", ["A", "B"], [["x", "y"], ["1", "2"]])?;
/// asm.append_equation("E=mc^2", 1)?;
/// asm.save("out.docx")?;
/// # Ok::<(), docxgen::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    document: Document,
    options: AssemblerOptions,
    heading_styles: BTreeMap<u8, String>,
}

impl DocumentAssembler {
    /// Create an assembler with default options.
    pub fn new() -> Self {
        Self::with_options(AssemblerOptions::default())
    }

    /// Create an assembler with custom options.
    pub fn with_options(options: AssemblerOptions) -> Self {
        let document = Document {
            metadata: options.metadata.clone(),
            styles: crate::model::StyleRegistry::with_builtins(),
            blocks: Vec::new(),
        };
        Self {
            document,
            options,
            heading_styles: BTreeMap::new(),
        }
    }

    /// Get the options in use.
    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Get the document built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the assembler and return the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Mutable access to the document metadata.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.document.metadata
    }

    /// Number of blocks appended so far.
    pub fn block_count(&self) -> usize {
        self.document.blocks.len()
    }

    /// Get a registered style by name.
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.document.styles.get(name)
    }

    /// Register a named style.
    ///
    /// Built-in styles are replaced silently. Re-registering a user style
    /// follows [`DuplicateStylePolicy`].
    pub fn register_style(&mut self, mut style: Style) -> Result<()> {
        check_text(&style.name)?;
        let id = style.style_id();
        if id.is_empty() {
            return Err(Error::InvalidStyleName(style.name));
        }
        if let Some(clash) = self.document.styles.by_id(&id) {
            if clash.name != style.name {
                return Err(Error::DuplicateStyle(style.name));
            }
        }

        match self.document.styles.get(&style.name) {
            Some(existing) if existing.builtin => {
                debug!("Redefining built-in style '{}'", style.name);
            }
            Some(_) => match self.options.duplicate_styles {
                DuplicateStylePolicy::Reject => return Err(Error::DuplicateStyle(style.name)),
                DuplicateStylePolicy::Overwrite => {
                    warn!("Style '{}' registered twice; keeping the last one", style.name);
                }
            },
            None => debug!("Registered style '{}'", style.name),
        }

        style.builtin = false;
        self.document.styles.insert(style);
        Ok(())
    }

    /// Route a heading level to a registered style.
    pub fn map_heading_level(&mut self, level: u8, style: impl Into<String>) -> Result<()> {
        check_heading_level(level)?;
        let style = style.into();
        self.require_style(&style)?;
        self.heading_styles.insert(level, style);
        Ok(())
    }

    /// Style used for headings of the given level.
    pub fn heading_style(&self, level: u8) -> String {
        self.heading_styles
            .get(&level)
            .cloned()
            .unwrap_or_else(|| format!("Heading {}", level))
    }

    /// Append a validated block.
    pub fn append(&mut self, block: Block) -> Result<()> {
        self.validate(&block)?;
        debug!(
            "Appended {} #{} in style '{}'",
            block.kind(),
            self.document.blocks.len(),
            block.style()
        );
        self.document.blocks.push(block);
        Ok(())
    }

    /// Append a paragraph of runs in the named style.
    pub fn append_paragraph<I>(&mut self, style: &str, runs: I) -> Result<()>
    where
        I: IntoIterator<Item = TextRun>,
    {
        self.append_formatted_paragraph(style, runs, ParagraphSpec::default())
    }

    /// Append a paragraph with direct formatting layered over its style.
    ///
    /// The equation style is reserved for [`Self::append_equation`].
    pub fn append_formatted_paragraph<I>(
        &mut self,
        style: &str,
        runs: I,
        format: ParagraphSpec,
    ) -> Result<()>
    where
        I: IntoIterator<Item = TextRun>,
    {
        self.append(Block::Paragraph(Paragraph {
            style: style.to_string(),
            runs: runs.into_iter().collect(),
            format,
        }))
    }

    /// Direct formatting of the most recently appended block, if it is a paragraph.
    ///
    /// Only the format is exposed, so the style invariant cannot be broken.
    pub fn last_paragraph_format(&mut self) -> Option<&mut ParagraphSpec> {
        match self.document.blocks.last_mut() {
            Some(Block::Paragraph(p)) => Some(&mut p.format),
            _ => None,
        }
    }

    /// Append a paragraph holding a single plain run.
    pub fn append_text(&mut self, style: &str, text: impl Into<String>) -> Result<()> {
        self.append_paragraph(style, [TextRun::new(text)])
    }

    /// Append a bulleted list item.
    pub fn append_bullet<I>(&mut self, runs: I) -> Result<()>
    where
        I: IntoIterator<Item = TextRun>,
    {
        self.append_paragraph(LIST_BULLET, runs)
    }

    /// Append a heading; its style comes from [`Self::heading_style`].
    pub fn append_heading(&mut self, level: u8, text: impl Into<String>) -> Result<()> {
        check_heading_level(level)?;
        let style = self.heading_style(level);
        self.append(Block::Heading(Heading {
            level,
            text: text.into(),
            style,
        }))
    }

    /// Append a captioned table.
    ///
    /// Every row must be exactly as wide as `headers`.
    pub fn append_table<H, R, C>(
        &mut self,
        caption_style: &str,
        caption: impl Into<String>,
        headers: H,
        rows: R,
    ) -> Result<()>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut table = Table::new(
            caption_style,
            caption,
            headers.into_iter().map(Into::into).collect(),
        );
        for row in rows {
            table.add_row(row.into_iter().map(Into::into).collect());
        }
        self.append(Block::Table(table))
    }

    /// Append a numbered equation line.
    pub fn append_equation(&mut self, expression: impl Into<String>, number: u32) -> Result<()> {
        self.append(Block::Equation(Equation {
            expression: expression.into(),
            number,
            style: EQUATION.to_string(),
        }))
    }

    /// Serialize the document to an in-memory package.
    pub fn to_bytes(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        render::to_docx(&self.document, options)
    }

    /// Save the document with default write options.
    ///
    /// The assembler is consumed; the finished document is returned.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<Document> {
        self.save_with_options(path, &WriteOptions::default())
    }

    /// Save the document with custom write options.
    pub fn save_with_options<P: AsRef<Path>>(
        self,
        path: P,
        options: &WriteOptions,
    ) -> Result<Document> {
        render::write_file(&self.document, options, path)?;
        Ok(self.document)
    }

    fn require_style(&self, name: &str) -> Result<()> {
        if self.document.styles.contains(name) {
            Ok(())
        } else {
            Err(Error::UnknownStyle(name.to_string()))
        }
    }

    fn validate(&self, block: &Block) -> Result<()> {
        check_block(block)?;
        match block {
            // The reader tells equations apart by this style
            Block::Paragraph(p) if p.style == EQUATION => {
                Err(Error::ReservedStyle(EQUATION.to_string()))
            }
            Block::Paragraph(p) => self.require_style(&p.style),
            Block::Heading(h) => {
                check_heading_level(h.level)?;
                self.require_style(&h.style)
            }
            Block::Equation(e) => self.require_style(&e.style),
            Block::Table(t) => {
                self.require_style(&t.caption_style)?;
                if t.headers.is_empty() {
                    return Err(Error::EmptyTable);
                }
                match t.first_mismatched_row() {
                    Some(row) => Err(Error::RowWidthMismatch {
                        row,
                        expected: t.headers.len(),
                        found: t.rows[row].len(),
                    }),
                    None => Ok(()),
                }
            }
        }
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn check_heading_level(level: u8) -> Result<()> {
    if (1..=MAX_HEADING_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(Error::InvalidHeadingLevel(level))
    }
}
