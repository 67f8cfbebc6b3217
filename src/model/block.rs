//! Content blocks.

use super::{Paragraph, Table, TextRun};
use serde::{Deserialize, Serialize};

/// One unit of document content, in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A styled paragraph of runs
    Paragraph(Paragraph),

    /// A section heading
    Heading(Heading),

    /// A captioned table
    Table(Table),

    /// A numbered display equation
    Equation(Equation),
}

impl Block {
    /// Name of the style the block is written with.
    pub fn style(&self) -> &str {
        match self {
            Block::Paragraph(p) => &p.style,
            Block::Heading(h) => &h.style,
            Block::Table(t) => &t.caption_style,
            Block::Equation(e) => &e.style,
        }
    }

    /// Short kind label, used by outlines and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading(_) => "heading",
            Block::Table(_) => "table",
            Block::Equation(_) => "equation",
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.plain_text(),
            Block::Heading(h) => h.text.clone(),
            Block::Table(t) => format!("{}\n{}", t.caption, t.plain_text()),
            Block::Equation(e) => format!("{}\t({})", e.expression, e.number),
        }
    }
}

/// A heading at a given outline level (1 = top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Outline level, 1-9
    pub level: u8,

    /// Heading text
    pub text: String,

    /// Resolved style name
    pub style: String,
}

/// A display equation with a right-aligned number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    /// Expression text
    pub expression: String,

    /// Equation number, written as `(n)`
    pub number: u32,

    /// Style name
    pub style: String,
}

impl Equation {
    /// Runs of the equation line: italic expression, tab, number label.
    pub fn runs(&self) -> Vec<TextRun> {
        vec![
            TextRun::italic(self.expression.clone()),
            TextRun::tab(),
            TextRun::new(self.label()),
        ]
    }

    /// The number label, e.g. `(1)`.
    pub fn label(&self) -> String {
        format!("({})", self.number)
    }

    /// Recognise the runs produced by [`Equation::runs`].
    pub fn from_runs(runs: &[TextRun], style: &str) -> Option<Self> {
        let [expression, tab, label] = runs else {
            return None;
        };
        if !expression.emphasis.italic || tab.text != "\t" {
            return None;
        }
        let number = label
            .text
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .and_then(|s| s.parse().ok())?;

        Some(Self {
            expression: expression.text.clone(),
            number,
            style: style.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equation_runs() {
        let eq = Equation {
            expression: "E=mc^2".to_string(),
            number: 1,
            style: "Equation".to_string(),
        };
        let runs = eq.runs();

        assert_eq!(runs.len(), 3);
        assert!(runs[0].emphasis.italic);
        assert_eq!(runs[1].text, "\t");
        assert_eq!(runs[2].text, "(1)");
        assert_eq!(Equation::from_runs(&runs, "Equation"), Some(eq));
    }

    #[test]
    fn test_equation_from_plain_runs() {
        let runs = vec![TextRun::new("x"), TextRun::tab(), TextRun::new("(1)")];
        assert_eq!(Equation::from_runs(&runs, "Equation"), None);

        let runs = vec![TextRun::italic("x"), TextRun::tab(), TextRun::new("(one)")];
        assert_eq!(Equation::from_runs(&runs, "Equation"), None);
    }

    #[test]
    fn test_block_style_and_kind() {
        let block = Block::Heading(Heading {
            level: 1,
            text: "I. INTRODUCTION".to_string(),
            style: "Heading1IEEE".to_string(),
        });
        assert_eq!(block.style(), "Heading1IEEE");
        assert_eq!(block.kind(), "heading");
        assert_eq!(block.plain_text(), "I. INTRODUCTION");
    }
}
