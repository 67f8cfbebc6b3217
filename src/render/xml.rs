//! WordprocessingML emission shared by the part writers, plus unit helpers.
//!
//! Parts are produced as `quick_xml` events, so element nesting and escaping
//! are handled by the writer rather than by hand.

use std::io;

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::model::{Block, Document, FontSpec, ParagraphSpec};

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Numbering instance used by bulleted paragraphs.
pub(crate) const BULLET_NUM_ID: u32 = 1;

/// Event writer over one package part.
pub(crate) type XmlWriter = Writer<Vec<u8>>;

/// Start a part with the standalone XML declaration.
pub(crate) fn part_writer() -> io::Result<XmlWriter> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.get_mut().push(b'\n');
    Ok(writer)
}

/// Finish a part and return its text.
pub(crate) fn into_part(writer: XmlWriter) -> Result<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Render(e.to_string()))
}

/// Points to twentieths of a point.
pub(crate) fn twips(points: f32) -> i32 {
    (points * 20.0).round() as i32
}

/// Twentieths of a point to points.
pub(crate) fn points_from_twips(twips: i32) -> f32 {
    twips as f32 / 20.0
}

/// Points to half-points (the unit of `w:sz`).
pub(crate) fn half_points(points: f32) -> u32 {
    (points * 2.0).round().max(1.0) as u32
}

/// Check a string against the XML 1.0 character range.
pub(crate) fn check_text(text: &str) -> Result<()> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(Error::InvalidCharacter(c as u32)),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || c >= '\u{10000}'
}

/// Check every piece of text a block writes.
pub(crate) fn check_block(block: &Block) -> Result<()> {
    match block {
        Block::Paragraph(p) => p.runs.iter().try_for_each(|r| check_text(&r.text)),
        Block::Heading(h) => check_text(&h.text),
        Block::Equation(e) => check_text(&e.expression),
        Block::Table(t) => {
            check_text(&t.caption)?;
            t.headers
                .iter()
                .chain(t.rows.iter().flatten())
                .try_for_each(|cell| check_text(cell))
        }
    }
}

/// Check all text of a document, metadata and style names included.
pub(crate) fn check_document(doc: &Document) -> Result<()> {
    let m = &doc.metadata;
    [&m.title, &m.subject, &m.author, &m.keywords]
        .into_iter()
        .flatten()
        .try_for_each(|value| check_text(value))?;
    doc.styles.iter().try_for_each(|s| check_text(&s.name))?;
    doc.blocks.iter().try_for_each(check_block)
}

/// Empty element without attributes.
pub(crate) fn empty(w: &mut XmlWriter, tag: &str) -> io::Result<()> {
    w.create_element(tag).write_empty()?;
    Ok(())
}

/// Empty element with a single `w:val` attribute.
pub(crate) fn val(w: &mut XmlWriter, tag: &str, value: &str) -> io::Result<()> {
    w.create_element(tag)
        .with_attribute(("w:val", value))
        .write_empty()?;
    Ok(())
}

/// Element holding only text.
pub(crate) fn text_element(w: &mut XmlWriter, tag: &str, text: &str) -> io::Result<()> {
    w.create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Whether `run_properties` would write anything.
pub(crate) fn has_run_properties(font: &FontSpec, bold: bool, italic: bool) -> bool {
    font.family.is_some()
        || font.size.is_some()
        || font.bold
        || font.italic
        || font.all_caps
        || bold
        || italic
}

/// `w:rPr` for a font plus run-level emphasis; nothing when both are empty.
pub(crate) fn run_properties(
    w: &mut XmlWriter,
    font: &FontSpec,
    bold: bool,
    italic: bool,
) -> io::Result<()> {
    if !has_run_properties(font, bold, italic) {
        return Ok(());
    }

    w.create_element("w:rPr").write_inner_content(|w| {
        if let Some(family) = font.family.as_deref() {
            w.create_element("w:rFonts")
                .with_attributes([("w:ascii", family), ("w:hAnsi", family), ("w:cs", family)])
                .write_empty()?;
        }
        if font.bold || bold {
            empty(w, "w:b")?;
        }
        if font.italic || italic {
            empty(w, "w:i")?;
        }
        if font.all_caps {
            empty(w, "w:caps")?;
        }
        if let Some(size) = font.size {
            let hp = half_points(size).to_string();
            val(w, "w:sz", &hp)?;
            val(w, "w:szCs", &hp)?;
        }
        Ok(())
    })?;
    Ok(())
}

/// Paragraph properties after `w:pStyle`/`w:keepNext`, in schema order.
pub(crate) fn paragraph_properties(w: &mut XmlWriter, spec: &ParagraphSpec) -> io::Result<()> {
    if spec.bullet {
        w.create_element("w:numPr").write_inner_content(|w| {
            val(w, "w:ilvl", "0")?;
            val(w, "w:numId", &BULLET_NUM_ID.to_string())
        })?;
    }

    if let Some(pos) = spec.right_tab {
        let pos = twips(pos).to_string();
        w.create_element("w:tabs").write_inner_content(|w| {
            w.create_element("w:tab")
                .with_attributes([("w:val", "right"), ("w:pos", pos.as_str())])
                .write_empty()?;
            Ok(())
        })?;
    }

    if spec.space_before.is_some() || spec.space_after.is_some() {
        let before = spec.space_before.map(|v| twips(v).to_string());
        let after = spec.space_after.map(|v| twips(v).to_string());
        let mut spacing = w.create_element("w:spacing");
        if let Some(before) = before.as_deref() {
            spacing = spacing.with_attribute(("w:before", before));
        }
        if let Some(after) = after.as_deref() {
            spacing = spacing.with_attribute(("w:after", after));
        }
        spacing.write_empty()?;
    }

    if spec.left_indent.is_some() || spec.first_line_indent.is_some() {
        let left = spec.left_indent.map(|v| twips(v).to_string());
        let first = spec.first_line_indent.map(|v| {
            if v < 0.0 {
                ("w:hanging", twips(-v).to_string())
            } else {
                ("w:firstLine", twips(v).to_string())
            }
        });
        let mut ind = w.create_element("w:ind");
        if let Some(left) = left.as_deref() {
            ind = ind.with_attribute(("w:left", left));
        }
        if let Some((name, value)) = first.as_ref() {
            ind = ind.with_attribute((*name, value.as_str()));
        }
        ind.write_empty()?;
    }

    if let Some(alignment) = spec.alignment {
        val(w, "w:jc", alignment.as_jc())?;
    }

    Ok(())
}

/// Run content: text segments, tabs and line breaks.
pub(crate) fn run_content(w: &mut XmlWriter, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return preserved_text(w, "");
    }

    let mut start = 0;
    for (i, ch) in text.char_indices() {
        let tag = match ch {
            '\t' => "w:tab",
            '\n' => "w:br",
            _ => continue,
        };
        if start < i {
            preserved_text(w, &text[start..i])?;
        }
        empty(w, tag)?;
        start = i + ch.len_utf8();
    }
    if start < text.len() {
        preserved_text(w, &text[start..])?;
    }
    Ok(())
}

fn preserved_text(w: &mut XmlWriter, text: &str) -> io::Result<()> {
    w.create_element("w:t")
        .with_attribute(("xml:space", "preserve"))
        .write_text_content(BytesText::new(text))?;
    Ok(())
}
