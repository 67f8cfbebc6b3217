//! WordprocessingML part generation.

use std::io;

use chrono::SecondsFormat;
use quick_xml::events::BytesText;

use crate::error::Result;
use crate::model::{
    style_id, Block, Document, FontSpec, Metadata, ParagraphSpec, Style, Table, TextRun,
    EQUATION, NORMAL,
};

use super::xml::{
    empty, into_part, paragraph_properties, part_writer, run_content, run_properties,
    text_element, twips, val, XmlWriter, BULLET_NUM_ID, W_NS,
};
use super::{PageSetup, WriteOptions};

/// Identifier of the table style every table uses.
pub(crate) const TABLE_GRID: &str = "TableGrid";

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CORE_REL: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Content types of the parts this writer produces.
const OVERRIDES: [(&str, &str); 4] = [
    (
        "/word/document.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    ),
    (
        "/word/styles.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
    ),
    (
        "/word/numbering.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
    ),
    (
        "/docProps/core.xml",
        "application/vnd.openxmlformats-package.core-properties+xml",
    ),
];

/// Paragraph-level settings that do not come from a `ParagraphSpec`.
#[derive(Default)]
struct ParagraphFrame<'a> {
    style_id: String,
    format: Option<&'a ParagraphSpec>,
    keep_next: bool,
    outline_level: Option<u8>,
}

/// Render `word/document.xml`.
pub(crate) fn document_xml(doc: &Document, options: &WriteOptions) -> Result<String> {
    let mut w = part_writer()?;
    w.create_element("w:document")
        .with_attribute(("xmlns:w", W_NS))
        .write_inner_content(|w| {
            w.create_element("w:body").write_inner_content(|w| {
                for block in &doc.blocks {
                    write_block(w, block, options)?;
                }
                write_section(w, &options.page)
            })?;
            Ok(())
        })?;
    into_part(w)
}

fn write_section(w: &mut XmlWriter, page: &PageSetup) -> io::Result<()> {
    let width = twips(page.width).to_string();
    let height = twips(page.height).to_string();
    let margin = twips(page.margin).to_string();
    let margin = margin.as_str();

    w.create_element("w:sectPr").write_inner_content(|w| {
        w.create_element("w:pgSz")
            .with_attributes([("w:w", width.as_str()), ("w:h", height.as_str())])
            .write_empty()?;
        w.create_element("w:pgMar")
            .with_attributes([
                ("w:top", margin),
                ("w:right", margin),
                ("w:bottom", margin),
                ("w:left", margin),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ])
            .write_empty()?;
        Ok(())
    })?;
    Ok(())
}

fn write_block(w: &mut XmlWriter, block: &Block, options: &WriteOptions) -> io::Result<()> {
    match block {
        Block::Paragraph(p) => {
            let frame = ParagraphFrame {
                style_id: style_id(&p.style),
                format: Some(&p.format),
                ..Default::default()
            };
            write_paragraph(w, &frame, &p.runs)
        }
        Block::Heading(h) => {
            let frame = ParagraphFrame {
                style_id: style_id(&h.style),
                outline_level: Some(h.level.saturating_sub(1)),
                ..Default::default()
            };
            write_paragraph(w, &frame, &[TextRun::new(h.text.clone())])
        }
        Block::Equation(e) => {
            let frame = ParagraphFrame {
                style_id: style_id(&e.style),
                ..Default::default()
            };
            write_paragraph(w, &frame, &e.runs())
        }
        Block::Table(t) => write_table(w, t, options),
    }
}

fn write_paragraph(
    w: &mut XmlWriter,
    frame: &ParagraphFrame<'_>,
    runs: &[TextRun],
) -> io::Result<()> {
    w.create_element("w:p").write_inner_content(|w| {
        w.create_element("w:pPr").write_inner_content(|w| {
            val(w, "w:pStyle", &frame.style_id)?;
            if frame.keep_next {
                empty(w, "w:keepNext")?;
            }
            if let Some(format) = frame.format {
                paragraph_properties(w, format)?;
            }
            if let Some(level) = frame.outline_level {
                val(w, "w:outlineLvl", &level.to_string())?;
            }
            Ok(())
        })?;

        let plain = FontSpec::default();
        for run in runs {
            write_run(w, run, &plain)?;
        }
        Ok(())
    })?;
    Ok(())
}

fn write_run(w: &mut XmlWriter, run: &TextRun, font: &FontSpec) -> io::Result<()> {
    w.create_element("w:r").write_inner_content(|w| {
        run_properties(w, font, run.emphasis.bold, run.emphasis.italic)?;
        run_content(w, &run.text)
    })?;
    Ok(())
}

fn write_table(w: &mut XmlWriter, table: &Table, options: &WriteOptions) -> io::Result<()> {
    // Caption stays on the same page as the grid
    let caption = ParagraphFrame {
        style_id: style_id(&table.caption_style),
        keep_next: true,
        ..Default::default()
    };
    write_paragraph(w, &caption, &[TextRun::new(table.caption.clone())])?;

    let columns = table.column_count().max(1);
    let column_width = (twips(options.page.text_width()) / columns as i32).to_string();

    w.create_element("w:tbl").write_inner_content(|w| {
        w.create_element("w:tblPr").write_inner_content(|w| {
            val(w, "w:tblStyle", TABLE_GRID)?;
            w.create_element("w:tblW")
                .with_attributes([("w:w", "0"), ("w:type", "auto")])
                .write_empty()?;
            w.create_element("w:tblLook")
                .with_attributes([
                    ("w:val", "04A0"),
                    ("w:firstRow", "1"),
                    ("w:lastRow", "0"),
                    ("w:firstColumn", "1"),
                    ("w:lastColumn", "0"),
                    ("w:noHBand", "0"),
                    ("w:noVBand", "1"),
                ])
                .write_empty()?;
            Ok(())
        })?;

        w.create_element("w:tblGrid").write_inner_content(|w| {
            for _ in 0..columns {
                w.create_element("w:gridCol")
                    .with_attribute(("w:w", column_width.as_str()))
                    .write_empty()?;
            }
            Ok(())
        })?;

        write_row(w, &table.headers, true, &column_width, options)?;
        for row in &table.rows {
            write_row(w, row, false, &column_width, options)?;
        }
        Ok(())
    })?;

    let spacer_format = ParagraphSpec::new().space_before(options.table_spacing);
    let spacer = ParagraphFrame {
        style_id: style_id(NORMAL),
        format: Some(&spacer_format),
        ..Default::default()
    };
    write_paragraph(w, &spacer, &[])
}

fn write_row(
    w: &mut XmlWriter,
    cells: &[String],
    header: bool,
    width: &str,
    options: &WriteOptions,
) -> io::Result<()> {
    w.create_element("w:tr").write_inner_content(|w| {
        if header {
            w.create_element("w:trPr")
                .write_inner_content(|w| empty(w, "w:tblHeader"))?;
        }
        for cell in cells {
            write_cell(w, cell, header, width, &options.table_cell_font)?;
        }
        Ok(())
    })?;
    Ok(())
}

fn write_cell(
    w: &mut XmlWriter,
    text: &str,
    header: bool,
    width: &str,
    font: &FontSpec,
) -> io::Result<()> {
    let run = if header {
        TextRun::bold(text)
    } else {
        TextRun::new(text)
    };

    w.create_element("w:tc").write_inner_content(|w| {
        w.create_element("w:tcPr").write_inner_content(|w| {
            w.create_element("w:tcW")
                .with_attributes([("w:w", width), ("w:type", "dxa")])
                .write_empty()?;
            val(w, "w:vAlign", "center")
        })?;
        w.create_element("w:p").write_inner_content(|w| {
            if header {
                w.create_element("w:pPr")
                    .write_inner_content(|w| val(w, "w:jc", "center"))?;
            }
            write_run(w, &run, font)
        })?;
        Ok(())
    })?;
    Ok(())
}

/// Render `word/styles.xml`.
///
/// An equation style without its own tab stop gets one at the page text width.
pub(crate) fn styles_xml(doc: &Document, options: &WriteOptions) -> Result<String> {
    let default_font = doc
        .styles
        .get(NORMAL)
        .map(|s| FontSpec {
            bold: false,
            italic: false,
            all_caps: false,
            ..s.font.clone()
        })
        .unwrap_or_default();

    let mut w = part_writer()?;
    w.create_element("w:styles")
        .with_attribute(("xmlns:w", W_NS))
        .write_inner_content(|w| {
            w.create_element("w:docDefaults").write_inner_content(|w| {
                w.create_element("w:rPrDefault")
                    .write_inner_content(|w| run_properties(w, &default_font, false, false))?;
                empty(w, "w:pPrDefault")
            })?;

            for style in doc.styles.iter() {
                write_style(w, style, options)?;
            }
            write_table_grid(w)
        })?;
    into_part(w)
}

fn write_style(w: &mut XmlWriter, style: &Style, options: &WriteOptions) -> io::Result<()> {
    let is_normal = style.name == NORMAL;
    let id = style.style_id();
    let normal_id = style_id(NORMAL);

    let mut paragraph = style.paragraph.clone();
    if style.name == EQUATION && paragraph.right_tab.is_none() {
        paragraph.right_tab = Some(options.page.text_width());
    }

    let mut element = w
        .create_element("w:style")
        .with_attribute(("w:type", "paragraph"));
    if is_normal {
        element = element.with_attribute(("w:default", "1"));
    }
    element
        .with_attribute(("w:styleId", id.as_str()))
        .write_inner_content(|w| {
            val(w, "w:name", &style.name)?;
            if !is_normal {
                val(w, "w:basedOn", &normal_id)?;
            }
            empty(w, "w:qFormat")?;
            if !paragraph.is_empty() {
                w.create_element("w:pPr")
                    .write_inner_content(|w| paragraph_properties(w, &paragraph))?;
            }
            run_properties(w, &style.font, false, false)
        })?;
    Ok(())
}

fn write_table_grid(w: &mut XmlWriter) -> io::Result<()> {
    w.create_element("w:style")
        .with_attributes([("w:type", "table"), ("w:styleId", TABLE_GRID)])
        .write_inner_content(|w| {
            val(w, "w:name", "Table Grid")?;
            w.create_element("w:tblPr").write_inner_content(|w| {
                w.create_element("w:tblBorders").write_inner_content(|w| {
                    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
                        w.create_element(format!("w:{}", edge))
                            .with_attributes([
                                ("w:val", "single"),
                                ("w:sz", "4"),
                                ("w:space", "0"),
                                ("w:color", "auto"),
                            ])
                            .write_empty()?;
                    }
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })?;
    Ok(())
}

/// Render `word/numbering.xml` with the single bullet list definition.
pub(crate) fn numbering_xml() -> Result<String> {
    let mut w = part_writer()?;
    w.create_element("w:numbering")
        .with_attribute(("xmlns:w", W_NS))
        .write_inner_content(|w| {
            w.create_element("w:abstractNum")
                .with_attribute(("w:abstractNumId", "0"))
                .write_inner_content(|w| {
                    val(w, "w:multiLevelType", "singleLevel")?;
                    w.create_element("w:lvl")
                        .with_attribute(("w:ilvl", "0"))
                        .write_inner_content(|w| {
                            val(w, "w:start", "1")?;
                            val(w, "w:numFmt", "bullet")?;
                            val(w, "w:lvlText", "\u{2022}")?;
                            val(w, "w:lvlJc", "left")?;
                            w.create_element("w:pPr").write_inner_content(|w| {
                                w.create_element("w:ind")
                                    .with_attributes([("w:left", "360"), ("w:hanging", "360")])
                                    .write_empty()?;
                                Ok(())
                            })?;
                            Ok(())
                        })?;
                    Ok(())
                })?;
            w.create_element("w:num")
                .with_attribute(("w:numId", BULLET_NUM_ID.to_string().as_str()))
                .write_inner_content(|w| val(w, "w:abstractNumId", "0"))?;
            Ok(())
        })?;
    into_part(w)
}

/// Render `docProps/core.xml`.
pub(crate) fn core_xml(metadata: &Metadata) -> Result<String> {
    let fields = [
        ("dc:title", &metadata.title),
        ("dc:subject", &metadata.subject),
        ("dc:creator", &metadata.author),
        ("cp:keywords", &metadata.keywords),
    ];
    let created = metadata
        .created
        .map(|c| c.to_rfc3339_opts(SecondsFormat::Secs, true));

    let mut w = part_writer()?;
    w.create_element("cp:coreProperties")
        .with_attributes([
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ])
        .write_inner_content(|w| {
            for (tag, value) in fields {
                if let Some(value) = value {
                    text_element(w, tag, value)?;
                }
            }
            if let Some(created) = created.as_deref() {
                w.create_element("dcterms:created")
                    .with_attribute(("xsi:type", "dcterms:W3CDTF"))
                    .write_text_content(BytesText::new(created))?;
            }
            Ok(())
        })?;
    into_part(w)
}

/// Render `[Content_Types].xml`.
pub(crate) fn content_types_xml() -> Result<String> {
    let mut w = part_writer()?;
    w.create_element("Types")
        .with_attribute(("xmlns", CONTENT_TYPES_NS))
        .write_inner_content(|w| {
            w.create_element("Default")
                .with_attributes([
                    ("Extension", "rels"),
                    (
                        "ContentType",
                        "application/vnd.openxmlformats-package.relationships+xml",
                    ),
                ])
                .write_empty()?;
            w.create_element("Default")
                .with_attributes([("Extension", "xml"), ("ContentType", "application/xml")])
                .write_empty()?;
            for (part, content_type) in OVERRIDES {
                w.create_element("Override")
                    .with_attributes([("PartName", part), ("ContentType", content_type)])
                    .write_empty()?;
            }
            Ok(())
        })?;
    into_part(w)
}

/// Write a relationships part from `(id, type, target)` triples.
fn relationships_xml(relationships: &[(&str, String, &str)]) -> Result<String> {
    let mut w = part_writer()?;
    w.create_element("Relationships")
        .with_attribute(("xmlns", REL_NS))
        .write_inner_content(|w| {
            for (id, kind, target) in relationships {
                w.create_element("Relationship")
                    .with_attributes([("Id", *id), ("Type", kind.as_str()), ("Target", *target)])
                    .write_empty()?;
            }
            Ok(())
        })?;
    into_part(w)
}

/// Render the package-level `_rels/.rels`.
pub(crate) fn package_rels_xml() -> Result<String> {
    relationships_xml(&[
        (
            "rId1",
            format!("{}/officeDocument", OFFICE_REL),
            "word/document.xml",
        ),
        ("rId2", CORE_REL.to_string(), "docProps/core.xml"),
    ])
}

/// Render `word/_rels/document.xml.rels`.
pub(crate) fn document_rels_xml() -> Result<String> {
    relationships_xml(&[
        ("rId1", format!("{}/styles", OFFICE_REL), "styles.xml"),
        ("rId2", format!("{}/numbering", OFFICE_REL), "numbering.xml"),
    ])
}
