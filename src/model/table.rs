//! Table types.

use serde::{Deserialize, Serialize};

/// A captioned grid with one header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Style of the caption paragraph
    pub caption_style: String,

    /// Caption text (may contain line breaks)
    pub caption: String,

    /// Header cells
    pub headers: Vec<String>,

    /// Data rows, each exactly `headers.len()` cells wide
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table without data rows.
    pub fn new(
        caption_style: impl Into<String>,
        caption: impl Into<String>,
        headers: Vec<String>,
    ) -> Self {
        Self {
            caption_style: caption_style.into(),
            caption: caption.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Add a data row.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first data row whose width differs from the header.
    pub fn first_mismatched_row(&self) -> Option<usize> {
        self.rows.iter().position(|r| r.len() != self.headers.len())
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Convert any iterable of string-likes into a row.
pub fn row<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Vec<String> {
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_with_data() {
        let mut table = Table::new("TableCaption", "TABLE I", row(["A", "B"]));
        table.add_row(row(["x", "y"]));
        table.add_row(row(["1", "2"]));

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.first_mismatched_row(), None);
        assert_eq!(table.plain_text(), "A\tB\nx\ty\n1\t2");
    }

    #[test]
    fn test_mismatched_row() {
        let mut table = Table::new("TableCaption", "", row(["A", "B"]));
        table.add_row(row(["x", "y"]));
        table.add_row(row(["only"]));

        assert_eq!(table.first_mismatched_row(), Some(1));
    }
}
