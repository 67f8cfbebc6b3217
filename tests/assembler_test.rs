//! Integration tests for document assembly.

use docxgen::model::{row, LIST_BULLET, NORMAL};
use docxgen::{
    AssemblerOptions, Block, DocumentAssembler, DuplicateStylePolicy, Error, FontSpec, Metadata,
    ParagraphSpec, Style, TextRun,
};

#[test]
fn test_unknown_style_rejected_until_registered() {
    let mut asm = DocumentAssembler::new();

    let result = asm.append_paragraph("Missing", [TextRun::new("text")]);
    assert!(matches!(result, Err(Error::UnknownStyle(ref name)) if name == "Missing"));

    asm.register_style(Style::new("Missing")).unwrap();
    asm.append_paragraph("Missing", [TextRun::new("text")])
        .unwrap();
    assert_eq!(asm.block_count(), 1);
}

#[test]
fn test_table_rows_must_match_header() {
    let mut asm = DocumentAssembler::new();

    asm.append_table(NORMAL, "cap", ["A", "B"], [["x", "y"], ["1", "2"]])
        .unwrap();

    let result = asm.append_table(NORMAL, "cap", ["A", "B"], [vec!["x", "y", "z"]]);
    assert!(matches!(
        result,
        Err(Error::RowWidthMismatch {
            row: 0,
            expected: 2,
            found: 3
        })
    ));

    // Failed appends leave the document untouched
    assert_eq!(asm.block_count(), 1);
}

#[test]
fn test_table_caption_style_checked_first() {
    let mut asm = DocumentAssembler::new();
    let result = asm.append_table("TableCaption", "cap", ["A"], [vec!["x", "y"]]);
    assert!(matches!(result, Err(Error::UnknownStyle(_))));
}

#[test]
fn test_duplicate_policy() {
    let mut reject = DocumentAssembler::new();
    reject.register_style(Style::new("Authors")).unwrap();
    assert!(matches!(
        reject.register_style(Style::new("Authors")),
        Err(Error::DuplicateStyle(_))
    ));

    let options = AssemblerOptions::new().with_duplicate_styles(DuplicateStylePolicy::Overwrite);
    let mut overwrite = DocumentAssembler::with_options(options);
    overwrite.register_style(Style::new("Authors")).unwrap();
    overwrite
        .register_style(Style::new("Authors").with_font(FontSpec::new("Arial", 11.0)))
        .unwrap();

    let names = overwrite.document().styles.names();
    assert_eq!(names.iter().filter(|n| **n == "Authors").count(), 1);
    assert_eq!(
        overwrite.style("Authors").unwrap().font.size,
        Some(11.0)
    );
}

#[test]
fn test_registration_order_preserved() {
    let mut asm = DocumentAssembler::new();
    asm.register_style(Style::new("Zeta")).unwrap();
    asm.register_style(Style::new("Alpha")).unwrap();

    let names = asm.document().styles.names();
    let zeta = names.iter().position(|n| *n == "Zeta").unwrap();
    let alpha = names.iter().position(|n| *n == "Alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_equation_layout() {
    let mut asm = DocumentAssembler::new();
    asm.append_equation("E=mc^2", 1).unwrap();

    let Block::Equation(eq) = &asm.document().blocks[0] else {
        panic!("expected equation");
    };
    let runs = eq.runs();
    assert_eq!(runs[0].text, "E=mc^2");
    assert!(runs[0].emphasis.italic);
    assert_eq!(runs[1].text, "\t");
    assert_eq!(runs[2].text, "(1)");

    // The tab stop is placed at write time from the page
    let style = asm.style("Equation").unwrap();
    assert!(style.paragraph.right_tab.is_none());
}

#[test]
fn test_formatted_paragraph_and_bullets() {
    let mut asm = DocumentAssembler::new();
    asm.append_formatted_paragraph(
        NORMAL,
        [TextRun::bold("Index Terms—"), TextRun::new("A, B.")],
        ParagraphSpec::new().space_after(18.0),
    )
    .unwrap();
    asm.append_bullet([TextRun::bold("Lead:"), TextRun::new(" body")])
        .unwrap();

    let blocks = &asm.document().blocks;
    assert!(matches!(&blocks[0], Block::Paragraph(p) if p.format.space_after == Some(18.0)));
    assert_eq!(blocks[1].style(), LIST_BULLET);
    assert!(asm.style(LIST_BULLET).unwrap().paragraph.bullet);
}

#[test]
fn test_metadata_from_options() {
    let options = AssemblerOptions::new().with_metadata(Metadata::with_title("Paper"));
    let mut asm = DocumentAssembler::with_options(options);
    asm.metadata_mut().author = Some("A. Author".to_string());

    let doc = asm.into_document();
    assert_eq!(doc.metadata.title.as_deref(), Some("Paper"));
    assert_eq!(doc.metadata.author.as_deref(), Some("A. Author"));
}

#[test]
fn test_append_prebuilt_block() {
    let mut asm = DocumentAssembler::new();
    let mut table = docxgen::Table::new(NORMAL, "cap", row(["A", "B"]));
    table.add_row(row(["1"]));

    assert!(matches!(
        asm.append(Block::Table(table)),
        Err(Error::RowWidthMismatch { .. })
    ));
}
