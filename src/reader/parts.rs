//! Event-driven parsers for the package parts the writer produces.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Alignment, FontSpec, Metadata, ParagraphSpec, Style, TextRun};
use crate::render::xml::points_from_twips;

/// A top-level body element before block reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Element {
    Paragraph(RawParagraph),
    Table(RawTable),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawParagraph {
    pub style_id: Option<String>,
    pub keep_next: bool,
    pub outline_level: Option<u8>,
    pub format: ParagraphSpec,
    pub runs: Vec<TextRun>,
}

impl RawParagraph {
    fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

pub(crate) fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Xml(err.to_string())
}

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match e.try_get_attribute(name).map_err(xml_error)? {
        Some(a) => Ok(Some(a.unescape_value().map_err(xml_error)?.into_owned())),
        None => Ok(None),
    }
}

fn int_attr(e: &BytesStart<'_>, name: &str) -> Result<Option<i32>> {
    Ok(attr(e, name)?.and_then(|v| v.parse().ok()))
}

/// On/off properties such as `<w:b/>` or `<w:b w:val="0"/>`.
fn toggle(e: &BytesStart<'_>) -> Result<bool> {
    Ok(!matches!(
        attr(e, "w:val")?.as_deref(),
        Some("0") | Some("false") | Some("off")
    ))
}

/// Apply one `w:pPr` child to a paragraph format.
fn apply_paragraph_property(spec: &mut ParagraphSpec, e: &BytesStart<'_>) -> Result<()> {
    match e.name().as_ref() {
        b"w:numPr" => spec.bullet = true,
        b"w:tab" => {
            if attr(e, "w:val")?.as_deref() == Some("right") {
                spec.right_tab = int_attr(e, "w:pos")?.map(points_from_twips);
            }
        }
        b"w:spacing" => {
            spec.space_before = int_attr(e, "w:before")?.map(points_from_twips);
            spec.space_after = int_attr(e, "w:after")?.map(points_from_twips);
        }
        b"w:ind" => {
            spec.left_indent = int_attr(e, "w:left")?.map(points_from_twips);
            spec.first_line_indent = match int_attr(e, "w:hanging")? {
                Some(hanging) => Some(-points_from_twips(hanging)),
                None => int_attr(e, "w:firstLine")?.map(points_from_twips),
            };
        }
        b"w:jc" => {
            spec.alignment = attr(e, "w:val")?.as_deref().and_then(Alignment::from_jc);
        }
        _ => {}
    }
    Ok(())
}

/// Apply one `w:rPr` child to a font.
fn apply_run_property(font: &mut FontSpec, e: &BytesStart<'_>) -> Result<()> {
    match e.name().as_ref() {
        b"w:rFonts" => font.family = attr(e, "w:ascii")?,
        b"w:b" => font.bold = toggle(e)?,
        b"w:i" => font.italic = toggle(e)?,
        b"w:caps" => font.all_caps = toggle(e)?,
        b"w:sz" => font.size = int_attr(e, "w:val")?.map(|hp| hp as f32 / 2.0),
        _ => {}
    }
    Ok(())
}

/// Walks `word/document.xml` and collects top-level paragraphs and tables.
#[derive(Default)]
struct BodyParser {
    stack: Vec<Vec<u8>>,
    elements: Vec<Element>,
    paragraph: Option<RawParagraph>,
    run: Option<TextRun>,
    table: Option<RawTable>,
    row: Option<(bool, Vec<String>)>,
    cell: Option<Vec<String>>,
}

impl BodyParser {
    fn inside(&self, tag: &[u8]) -> bool {
        self.stack.iter().any(|t| t.as_slice() == tag)
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let name = e.name();
        match name.as_ref() {
            b"w:p" => self.paragraph = Some(RawParagraph::default()),
            b"w:r" => {
                if self.paragraph.is_some() {
                    self.run = Some(TextRun::new(""));
                }
            }
            b"w:tbl" => self.table = Some(RawTable::default()),
            b"w:tr" => self.row = Some((false, Vec::new())),
            b"w:tblHeader" => {
                if let Some(row) = self.row.as_mut() {
                    row.0 = toggle(e)?;
                }
            }
            b"w:tc" => self.cell = Some(Vec::new()),
            tag => {
                if let Some(run) = self.run.as_mut() {
                    match tag {
                        b"w:tab" => run.text.push('\t'),
                        b"w:br" | b"w:cr" => run.text.push('\n'),
                        b"w:b" => run.emphasis.bold = toggle(e)?,
                        b"w:i" => run.emphasis.italic = toggle(e)?,
                        _ => {}
                    }
                } else if let Some(paragraph) = self.paragraph.as_mut() {
                    if !self.stack.iter().any(|t| t.as_slice() == b"w:pPr") {
                        return Ok(());
                    }
                    match tag {
                        b"w:pStyle" => paragraph.style_id = attr(e, "w:val")?,
                        b"w:keepNext" => paragraph.keep_next = toggle(e)?,
                        b"w:outlineLvl" => {
                            paragraph.outline_level =
                                attr(e, "w:val")?.and_then(|v| v.parse().ok())
                        }
                        _ => apply_paragraph_property(&mut paragraph.format, e)?,
                    }
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"w:r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.runs.push(run);
                }
            }
            b"w:p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    if let Some(cell) = self.cell.as_mut() {
                        cell.push(paragraph.plain_text());
                    } else if self.table.is_none() {
                        self.elements.push(Element::Paragraph(paragraph));
                    }
                }
            }
            b"w:tc" => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.1.push(cell.join("\n"));
                }
            }
            b"w:tr" => {
                if let (Some((is_header, cells)), Some(table)) =
                    (self.row.take(), self.table.as_mut())
                {
                    if is_header && table.header.is_none() {
                        table.header = Some(cells);
                    } else {
                        table.rows.push(cells);
                    }
                }
            }
            b"w:tbl" => {
                if let Some(table) = self.table.take() {
                    self.elements.push(Element::Table(table));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !self.stack.last().is_some_and(|t| t.as_slice() == b"w:t") {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }
}

/// Parse `word/document.xml` into top-level elements.
pub(crate) fn parse_document(xml: &str) -> Result<Vec<Element>> {
    let mut reader = Reader::from_str(xml);
    let mut parser = BodyParser::default();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                parser.open(&e)?;
                parser.stack.push(e.name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close(e.name().as_ref());
            }
            Event::End(e) => {
                parser.stack.pop();
                parser.close(e.name().as_ref());
            }
            Event::Text(t) => {
                let text: Cow<'_, str> = t.unescape().map_err(xml_error)?;
                parser.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if parser.inside(b"w:body") {
        return Err(Error::Xml("unterminated document body".to_string()));
    }
    Ok(parser.elements)
}

/// Parse the paragraph styles of `word/styles.xml`, in document order.
pub(crate) fn parse_styles(xml: &str) -> Result<Vec<Style>> {
    let mut reader = Reader::from_str(xml);
    let mut styles = Vec::new();
    let mut current: Option<(String, Style)> = None;
    let mut in_ppr = false;
    let mut in_rpr = false;

    loop {
        let (e, empty) = match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(e) => {
                match e.name().as_ref() {
                    b"w:style" => {
                        if let Some((id, mut style)) = current.take() {
                            if style.name.is_empty() {
                                style.name = id;
                            }
                            styles.push(style);
                        }
                    }
                    b"w:pPr" => in_ppr = false,
                    b"w:rPr" => in_rpr = false,
                    _ => {}
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        match e.name().as_ref() {
            b"w:style" => {
                if attr(&e, "w:type")?.as_deref() == Some("paragraph") {
                    let id = attr(&e, "w:styleId")?.unwrap_or_default();
                    current = Some((id, Style::new("")));
                    if empty {
                        if let Some((id, mut style)) = current.take() {
                            style.name = id;
                            styles.push(style);
                        }
                    }
                }
            }
            b"w:pPr" if !empty => in_ppr = true,
            b"w:rPr" if !empty => in_rpr = true,
            b"w:name" => {
                if let Some((_, style)) = current.as_mut() {
                    style.name = attr(&e, "w:val")?.unwrap_or_default();
                }
            }
            _ => {
                if let Some((_, style)) = current.as_mut() {
                    if in_ppr {
                        apply_paragraph_property(&mut style.paragraph, &e)?;
                    } else if in_rpr {
                        apply_run_property(&mut style.font, &e)?;
                    }
                }
            }
        }
    }

    Ok(styles)
}

/// Parse `docProps/core.xml`.
pub(crate) fn parse_core(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    let mut metadata = Metadata::default();
    let mut field: Option<Vec<u8>> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => field = Some(e.name().as_ref().to_vec()),
            Event::End(_) => field = None,
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_error)?.into_owned();
                match field.as_deref() {
                    Some(b"dc:title") => metadata.title = Some(text),
                    Some(b"dc:subject") => metadata.subject = Some(text),
                    Some(b"dc:creator") => metadata.author = Some(text),
                    Some(b"cp:keywords") => metadata.keywords = Some(text),
                    Some(b"dcterms:created") => {
                        metadata.created = DateTime::parse_from_rfc3339(text.trim())
                            .ok()
                            .map(|d| d.with_timezone(&Utc));
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}
