//! Error types for docxgen library.

use std::io;
use thiserror::Error;

/// Result type alias for docxgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A block referenced a style that has not been registered.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// A style name was registered twice while duplicates are rejected.
    #[error("Style already registered: {0}")]
    DuplicateStyle(String),

    /// A style name yields no usable package identifier.
    #[error("Invalid style name: {0:?}")]
    InvalidStyleName(String),

    /// A table row does not have as many cells as the header.
    #[error("Table row {row} has {found} cells, expected {expected}")]
    RowWidthMismatch {
        /// Zero-based index of the offending data row
        row: usize,
        /// Number of header cells
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },

    /// A table was appended without any header cells.
    #[error("Table has no columns")]
    EmptyTable,

    /// Text holds a character XML 1.0 cannot represent.
    #[error("Character U+{0:04X} cannot be stored in a document")]
    InvalidCharacter(u32),

    /// A style is reserved for one block kind.
    #[error("Style '{0}' is reserved for equation blocks")]
    ReservedStyle(String),

    /// Heading level outside 1..=9.
    #[error("Invalid heading level: {0} (expected 1-9)")]
    InvalidHeadingLevel(u8),

    /// Error in the zip container.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Malformed XML inside a package part.
    #[error("XML error: {0}")]
    Xml(String),

    /// The input is not a zip-based document package.
    #[error("Unknown file format: not a DOCX package")]
    UnknownFormat,

    /// A required package part is absent.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Article manifest could not be decoded.
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}
