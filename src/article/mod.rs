//! IEEE-style article layer.
//!
//! An [`Article`] is a declarative manifest (usually JSON) describing a
//! conference paper. [`Article::assemble`] turns it into a populated
//! [`DocumentAssembler`] using the presets from [`ieee`].

pub mod ieee;

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::assembler::{AssemblerOptions, DocumentAssembler};
use crate::error::Result;
use crate::model::{ParagraphSpec, TextRun, NORMAL};

/// Default output file name for the built-in article.
pub const SMECI_OUTPUT: &str = "SMECI_IEEE_Formatted_Article.docx";

const SMECI_MANIFEST: &str = include_str!("../../assets/smeci_article.json");

/// A conference article manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Paper title
    pub title: String,

    /// Author line
    pub authors: String,

    /// Institution and contact block; `\n` separates lines
    #[serde(default)]
    pub affiliation: String,

    /// Abstract body, without the `Abstract—` lead
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Index terms, without the `Index Terms—` lead
    #[serde(default)]
    pub index_terms: String,

    /// Top-level sections in order
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Bibliography entries
    #[serde(default)]
    pub references: Vec<String>,
}

/// A top-level section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading, e.g. `I. INTRODUCTION`
    pub heading: String,

    /// Section content in order
    #[serde(default)]
    pub items: Vec<Item>,
}

/// One piece of section content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    /// Lettered subsection heading
    Subheading { text: String },

    /// Plain body paragraph
    Paragraph { text: String },

    /// Paragraph opening with an emphasized lead-in
    LeadParagraph {
        lead: String,
        text: String,
        #[serde(default)]
        emphasis: LeadEmphasis,
    },

    /// Bulleted list item, optionally with a bold lead-in
    Bullet {
        #[serde(default)]
        lead: Option<String>,
        text: String,
    },

    /// Numbered display equation
    Equation { expression: String, number: u32 },

    /// Captioned table
    Table {
        caption: String,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Emphasis applied to a paragraph lead-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadEmphasis {
    #[default]
    Bold,
    Italic,
}

impl LeadEmphasis {
    fn run(self, text: &str) -> TextRun {
        match self {
            LeadEmphasis::Bold => TextRun::bold(text),
            LeadEmphasis::Italic => TextRun::italic(text),
        }
    }
}

impl Article {
    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a manifest from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// The bundled SMECI article.
    pub fn smeci() -> Result<Self> {
        Self::from_json(SMECI_MANIFEST)
    }

    /// Number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Build the article into a fresh assembler.
    ///
    /// Title and author metadata are filled from the manifest unless the
    /// options already carry them.
    pub fn assemble(&self, options: AssemblerOptions) -> Result<DocumentAssembler> {
        let mut asm = DocumentAssembler::with_options(options);
        ieee::register_styles(&mut asm)?;

        let metadata = asm.metadata_mut();
        metadata.title.get_or_insert_with(|| self.title.clone());
        metadata.author.get_or_insert_with(|| self.authors.clone());
        if !self.index_terms.is_empty() {
            metadata
                .keywords
                .get_or_insert_with(|| self.index_terms.trim_end_matches('.').to_string());
        }

        asm.append_text(ieee::ARTICLE_TITLE, self.title.as_str())?;
        asm.append_text(ieee::AUTHORS, self.authors.as_str())?;
        if !self.affiliation.is_empty() {
            asm.append_text(ieee::AFFILIATION, self.affiliation.as_str())?;
        }

        asm.append_formatted_paragraph(
            NORMAL,
            [TextRun::bold("Abstract—"), TextRun::new(self.abstract_text.as_str())],
            ParagraphSpec::new().space_after(6.0),
        )?;
        if !self.index_terms.is_empty() {
            asm.append_formatted_paragraph(
                NORMAL,
                [TextRun::bold("Index Terms—"), TextRun::new(self.index_terms.as_str())],
                ParagraphSpec::new().space_after(18.0),
            )?;
        }

        for section in &self.sections {
            asm.append_heading(1, section.heading.as_str())?;
            for item in &section.items {
                append_item(&mut asm, item)?;
            }
        }

        if !self.references.is_empty() {
            asm.append_heading(1, "REFERENCES")?;
            for reference in &self.references {
                asm.append_text(ieee::REFERENCE, reference.as_str())?;
            }
        }

        info!(
            "Assembled article '{}': {} sections, {} blocks",
            self.title,
            self.sections.len(),
            asm.block_count()
        );
        Ok(asm)
    }
}

fn append_item(asm: &mut DocumentAssembler, item: &Item) -> Result<()> {
    match item {
        Item::Subheading { text } => asm.append_heading(2, text.as_str()),
        Item::Paragraph { text } => asm.append_text(NORMAL, text.as_str()),
        Item::LeadParagraph {
            lead,
            text,
            emphasis,
        } => asm.append_paragraph(NORMAL, [emphasis.run(lead), TextRun::new(text.as_str())]),
        Item::Bullet { lead, text } => {
            let mut runs = Vec::with_capacity(2);
            if let Some(lead) = lead {
                runs.push(TextRun::bold(lead.as_str()));
            }
            runs.push(TextRun::new(text.as_str()));
            asm.append_bullet(runs)
        }
        Item::Equation { expression, number } => {
            asm.append_equation(expression.as_str(), *number)
        }
        Item::Table {
            caption,
            headers,
            rows,
        } => asm.append_table(
            ieee::TABLE_CAPTION,
            caption.as_str(),
            headers.iter().map(String::as_str),
            rows.iter().map(|r| r.iter().map(String::as_str)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Block, LIST_BULLET};

    const MINIMAL: &str = r#"{
        "title": "On Testing",
        "authors": "A. Author",
        "abstract": "Short.",
        "sections": [
            {"heading": "I. INTRODUCTION", "items": [
                {"type": "subheading", "text": "A. Scope"},
                {"type": "lead_paragraph", "lead": "Methods:", "text": " more",
                 "emphasis": "italic"},
                {"type": "bullet", "lead": "Point:", "text": " detail"},
                {"type": "equation", "expression": "a=b", "number": 2},
                {"type": "table", "caption": "TABLE I", "headers": ["A", "B"], "rows": [["1", "2"]]}
            ]}
        ],
        "references": ["[1] Ref."]
    }"#;

    #[test]
    fn test_from_json() {
        let article = Article::from_json(MINIMAL).unwrap();
        assert_eq!(article.sections.len(), 1);
        assert_eq!(article.item_count(), 5);
        assert!(article.affiliation.is_empty());
        assert!(matches!(
            article.sections[0].items[1],
            Item::LeadParagraph {
                emphasis: LeadEmphasis::Italic,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_manifest() {
        let result = Article::from_json(r#"{"title": 1}"#);
        assert!(matches!(result, Err(Error::Manifest(_))));
    }

    #[test]
    fn test_assemble_minimal() {
        let article = Article::from_json(MINIMAL).unwrap();
        let asm = article.assemble(AssemblerOptions::default()).unwrap();
        let doc = asm.document();

        // title, authors, abstract, heading, 5 items, references heading, 1 reference
        assert_eq!(doc.block_count(), 11);
        assert_eq!(doc.metadata.title.as_deref(), Some("On Testing"));

        let Block::Paragraph(abstract_para) = &doc.blocks[2] else {
            panic!("expected abstract paragraph");
        };
        assert_eq!(abstract_para.runs[0].text, "Abstract—");
        assert!(abstract_para.runs[0].emphasis.bold);
        assert_eq!(abstract_para.format.space_after, Some(6.0));

        assert!(matches!(&doc.blocks[4], Block::Heading(h) if h.style == ieee::HEADING_2));
        assert!(matches!(&doc.blocks[5], Block::Paragraph(p) if p.runs[0].emphasis.italic));
        assert_eq!(doc.blocks[6].style(), LIST_BULLET);
        assert!(matches!(
            &doc.blocks[8],
            Block::Table(t) if t.caption_style == ieee::TABLE_CAPTION
        ));
        assert_eq!(doc.blocks[10].style(), ieee::REFERENCE);
    }

    #[test]
    fn test_smeci_manifest() {
        let article = Article::smeci().unwrap();
        assert!(article.title.ends_with("(SMECI)"));
        assert_eq!(article.references.len(), 3);

        let doc = article
            .assemble(AssemblerOptions::default())
            .unwrap()
            .into_document();
        let table = doc.tables().next().unwrap();
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.row_count(), 6);
    }
}
