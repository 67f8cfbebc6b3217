//! Reading DOCX packages back into the document model.
//!
//! The reader understands the subset of WordprocessingML this crate writes.
//! Block structure is recovered from the same markers the writer emits:
//! a heading carries an outline level, a table caption keeps with the next
//! element, a table header row is flagged as repeating, and the empty
//! paragraph right after a table is its spacer.

mod parts;

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{
    Block, Document, Equation, Heading, Paragraph, StyleRegistry, Table, EQUATION, NORMAL,
};
use crate::render::{CORE_PART, DOCUMENT_PART, STYLES_PART};

use parts::{parse_core, parse_document, parse_styles, Element, RawParagraph, RawTable};

/// Zip local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Check if bytes start with the zip container signature.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Reader over the parts of one DOCX package.
pub struct DocxReader {
    document_xml: String,
    styles_xml: Option<String>,
    core_xml: Option<String>,
}

impl DocxReader {
    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Open a package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !is_docx_bytes(data) {
            return Err(Error::UnknownFormat);
        }

        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let document_xml = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        let styles_xml = read_part(&mut archive, STYLES_PART)?;
        let core_xml = read_part(&mut archive, CORE_PART)?;

        log::debug!(
            "Opened package with {} entries (styles: {}, core: {})",
            archive.len(),
            styles_xml.is_some(),
            core_xml.is_some()
        );

        Ok(Self {
            document_xml,
            styles_xml,
            core_xml,
        })
    }

    /// Open a package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse the package into a document.
    pub fn parse(&self) -> Result<Document> {
        let mut doc = Document::new();

        if let Some(xml) = &self.core_xml {
            doc.metadata = parse_core(xml)?;
        }

        let mut names = HashMap::new();
        if let Some(xml) = &self.styles_xml {
            let mut registry = StyleRegistry::new();
            for style in parse_styles(xml)? {
                names.insert(style.style_id(), style.name.clone());
                registry.insert(style);
            }
            doc.styles = registry;
        }

        let elements = parse_document(&self.document_xml)?;
        doc.blocks = build_blocks(elements, &names);

        log::debug!(
            "Parsed {} blocks and {} styles",
            doc.blocks.len(),
            doc.styles.len()
        );
        Ok(doc)
    }
}

/// Read a DOCX file into a document.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocxReader::open(path)?.parse()
}

/// Read DOCX bytes into a document.
pub fn read_bytes(data: &[u8]) -> Result<Document> {
    DocxReader::from_bytes(data)?.parse()
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn style_name(names: &HashMap<String, String>, id: Option<&str>) -> String {
    match id {
        Some(id) => names.get(id).cloned().unwrap_or_else(|| id.to_string()),
        None => NORMAL.to_string(),
    }
}

fn build_blocks(elements: Vec<Element>, names: &HashMap<String, String>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut iter = elements.into_iter().peekable();

    while let Some(element) = iter.next() {
        match element {
            Element::Paragraph(p)
                if p.keep_next && matches!(iter.peek(), Some(Element::Table(_))) =>
            {
                if let Some(Element::Table(t)) = iter.next() {
                    blocks.push(Block::Table(build_table(Some(p), t, names)));
                    skip_spacer(&mut iter);
                }
            }
            Element::Paragraph(p) => blocks.push(build_paragraph(p, names)),
            Element::Table(t) => {
                blocks.push(Block::Table(build_table(None, t, names)));
                skip_spacer(&mut iter);
            }
        }
    }

    blocks
}

fn skip_spacer<I: Iterator<Item = Element>>(iter: &mut std::iter::Peekable<I>) {
    if matches!(iter.peek(), Some(Element::Paragraph(p)) if p.runs.is_empty()) {
        iter.next();
    }
}

fn build_paragraph(p: RawParagraph, names: &HashMap<String, String>) -> Block {
    let style = style_name(names, p.style_id.as_deref());

    if let Some(level) = p.outline_level {
        let text = p.runs.iter().map(|r| r.text.as_str()).collect();
        return Block::Heading(Heading {
            level: level.saturating_add(1),
            text,
            style,
        });
    }

    if style == EQUATION {
        if let Some(equation) = Equation::from_runs(&p.runs, &style) {
            return Block::Equation(equation);
        }
    }

    Block::Paragraph(Paragraph {
        style,
        runs: p.runs,
        format: p.format,
    })
}

fn build_table(
    caption: Option<RawParagraph>,
    raw: RawTable,
    names: &HashMap<String, String>,
) -> Table {
    let (caption_style, caption) = match caption {
        Some(p) => (
            style_name(names, p.style_id.as_deref()),
            p.runs.iter().map(|r| r.text.as_str()).collect(),
        ),
        None => (NORMAL.to_string(), String::new()),
    };

    let mut rows = raw.rows.into_iter();
    let headers = match raw.header {
        Some(headers) => headers,
        None => rows.next().unwrap_or_default(),
    };

    Table {
        caption_style,
        caption,
        headers,
        rows: rows.collect(),
    }
}
