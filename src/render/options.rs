//! Write options and configuration.

use crate::model::{FontSpec, POINTS_PER_INCH};

/// Options for serializing documents to a package.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compression of package entries
    pub compression: Compression,

    /// Page geometry
    pub page: PageSetup,

    /// Font applied to every run inside table cells
    pub table_cell_font: FontSpec,

    /// Space before the paragraph that follows a table, in points
    pub table_spacing: f32,
}

impl WriteOptions {
    /// Create new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression method.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Store entries without compression.
    pub fn stored(mut self) -> Self {
        self.compression = Compression::Stored;
        self
    }

    /// Set the page geometry.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Set the table cell font.
    pub fn with_table_cell_font(mut self, font: FontSpec) -> Self {
        self.table_cell_font = font;
        self
    }

    /// Set the spacing after tables.
    pub fn with_table_spacing(mut self, points: f32) -> Self {
        self.table_spacing = points;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: Compression::Deflated,
            page: PageSetup::letter(),
            table_cell_font: FontSpec::new("Times New Roman", 8.0),
            table_spacing: 12.0,
        }
    }
}

/// Compression of package entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Deflate (what word processors write)
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Page size and margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Margin on all four sides
    pub margin: f32,
}

impl PageSetup {
    /// US Letter (8.5 x 11 inches) with one-inch margins.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: POINTS_PER_INCH,
        }
    }

    /// A4 (210 x 297 mm) with one-inch margins.
    pub fn a4() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: POINTS_PER_INCH,
        }
    }

    /// Usable line width.
    pub fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}
