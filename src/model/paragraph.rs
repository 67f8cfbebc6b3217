//! Paragraph and run-level types.

use super::style::{ParagraphSpec, NORMAL};
use serde::{Deserialize, Serialize};

/// A paragraph of styled runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Name of the paragraph style
    pub style: String,

    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,

    /// Direct formatting layered over the style
    #[serde(default, skip_serializing_if = "ParagraphSpec::is_empty")]
    pub format: ParagraphSpec,
}

impl Paragraph {
    /// Create an empty paragraph in the given style.
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            runs: Vec::new(),
            format: ParagraphSpec::default(),
        }
    }

    /// Create a paragraph holding one plain run.
    pub fn with_text(style: impl Into<String>, text: impl Into<String>) -> Self {
        let mut p = Self::new(style);
        p.add_text(text);
        p
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.plain_text().trim().is_empty()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new(NORMAL)
    }
}

/// A run of text with consistent emphasis.
///
/// `\n` in the text is written as a line break and `\t` as a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Emphasis layered over the paragraph style
    #[serde(default, skip_serializing_if = "Emphasis::is_plain")]
    pub emphasis: Emphasis,
}

impl TextRun {
    /// Create a new run without emphasis.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::default(),
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Create a run holding a single tab.
    pub fn tab() -> Self {
        Self::new("\t")
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Local emphasis overrides of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emphasis {
    /// Bold text
    #[serde(default)]
    pub bold: bool,

    /// Italic text
    #[serde(default)]
    pub italic: bool,
}

impl Emphasis {
    /// Check that no emphasis is applied.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic
    }
}
