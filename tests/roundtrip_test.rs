//! Integration tests for writing packages and reading them back.

use std::fs;
use std::io::{Cursor, Read};

use docxgen::model::{EQUATION, NORMAL};
use docxgen::render::{package_parts, to_docx, DOCUMENT_PART};
use docxgen::{
    read_bytes, read_file, Block, DocumentAssembler, DocxReader, Error, Metadata, PageSetup,
    Style, TextRun, WriteOptions,
};

#[derive(Debug, Clone, Copy)]
enum Step {
    Heading,
    Paragraph,
    EmptyParagraph,
    Table,
    Equation,
    Bullet,
}

fn apply(asm: &mut DocumentAssembler, step: Step, data_rows: bool) {
    match step {
        Step::Heading => asm.append_heading(2, "A. Scope").unwrap(),
        Step::Paragraph => asm
            .append_paragraph(NORMAL, [TextRun::bold("Lead:"), TextRun::new(" body")])
            .unwrap(),
        Step::EmptyParagraph => asm.append_paragraph(NORMAL, Vec::<TextRun>::new()).unwrap(),
        Step::Table => {
            let rows: Vec<[&str; 2]> = if data_rows {
                vec![["1", "2"], ["3", "4"]]
            } else {
                Vec::new()
            };
            asm.append_table(NORMAL, "TABLE I", ["A", "B"], rows).unwrap()
        }
        Step::Equation => asm.append_equation("a+b", 2).unwrap(),
        Step::Bullet => asm.append_bullet([TextRun::new("item")]).unwrap(),
    }
}

fn permutations(steps: &[Step]) -> Vec<Vec<Step>> {
    if steps.len() <= 1 {
        return vec![steps.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..steps.len() {
        let mut rest = steps.to_vec();
        let first = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

fn sample() -> DocumentAssembler {
    let mut asm = DocumentAssembler::new();
    asm.register_style(Style::new("Caption")).unwrap();
    asm.append_heading(1, "I. INTRODUCTION").unwrap();
    asm.append_paragraph(
        NORMAL,
        [TextRun::italic("Methods:"), TextRun::new(" a <b> & \"c\"")],
    )
    .unwrap();
    asm.append_text(NORMAL, "line one\nline two").unwrap();
    asm.append_table("Caption", "cap", ["A", "B"], [["x", "y"], ["1", "2"]])
        .unwrap();
    asm.append_equation("E=mc^2", 1).unwrap();
    asm.append_heading(2, "A. Details").unwrap();
    asm
}

#[test]
fn test_block_order_survives_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.docx");

    let asm = sample();
    let expected = asm.document().blocks.clone();
    asm.save(&path).unwrap();

    let doc = read_file(&path).unwrap();
    assert_eq!(doc.blocks, expected);
}

#[test]
fn test_single_table_shape() {
    let mut asm = DocumentAssembler::new();
    asm.append_table(NORMAL, "cap", ["A", "B"], [["x", "y"], ["1", "2"]])
        .unwrap();
    let bytes = asm.to_bytes(&WriteOptions::default()).unwrap();

    let doc = read_bytes(&bytes).unwrap();
    let tables: Vec<_> = doc.tables().collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].column_count(), 2);
    assert_eq!(tables[0].headers, vec!["A", "B"]);
    assert_eq!(tables[0].row_count(), 2);

    let xml = &package_parts(asm.document(), &WriteOptions::default())
        .unwrap()
        .into_iter()
        .find(|(name, _)| *name == DOCUMENT_PART)
        .unwrap()
        .1;
    assert_eq!(xml.matches("<w:tbl>").count(), 1);
    assert_eq!(xml.matches("<w:tr>").count(), 3);
    assert_eq!(xml.matches("<w:tblHeader/>").count(), 1);
}

#[test]
fn test_equation_single_line() {
    let mut asm = DocumentAssembler::new();
    asm.append_equation("E=mc^2", 1).unwrap();
    let bytes = asm.to_bytes(&WriteOptions::default()).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();

    assert_eq!(xml.matches("<w:p>").count(), 1);
    let expr = xml.find("E=mc^2").unwrap();
    let tab = xml.find("<w:tab/>").unwrap();
    let label = xml.find("(1)").unwrap();
    assert!(expr < tab && tab < label);
}

#[test]
fn test_identical_input_identical_bytes() {
    let options = WriteOptions::default();
    let first = sample().to_bytes(&options).unwrap();
    let second = sample().to_bytes(&options).unwrap();
    assert_eq!(first, second);

    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.docx");
    let b = dir.path().join("b.docx");
    sample().save(&a).unwrap();
    sample().save(&b).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.docx");

    let result = sample().save(&path);
    assert!(matches!(result, Err(Error::Io(_))));
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_metadata_roundtrip() {
    let mut asm = DocumentAssembler::new();
    *asm.metadata_mut() = Metadata {
        title: Some("Title & more".to_string()),
        author: Some("A. Author".to_string()),
        keywords: Some("one, two".to_string()),
        ..Default::default()
    };
    asm.append_text(NORMAL, "body").unwrap();

    let bytes = asm.to_bytes(&WriteOptions::new().stored()).unwrap();
    let doc = DocxReader::from_reader(Cursor::new(bytes)).unwrap().parse().unwrap();

    assert_eq!(doc.metadata, asm.document().metadata);
}

#[test]
fn test_styles_read_back() {
    let bytes = sample().to_bytes(&WriteOptions::default()).unwrap();
    let doc = read_bytes(&bytes).unwrap();

    assert!(doc.styles.contains("Caption"));
    assert!(doc.styles.contains("Heading 1"));
    let heading = doc.styles.get("Heading 1").unwrap();
    assert!(heading.font.bold);
    assert_eq!(heading.font.size, Some(14.0));
}

#[test]
fn test_document_part_required() {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        writer
            .start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.finish().unwrap();
    }

    let result = read_bytes(buffer.get_ref());
    assert!(matches!(result, Err(Error::MissingPart(ref part)) if part == DOCUMENT_PART));
}

#[test]
fn test_heading_blocks_in_order() {
    let doc = read_bytes(&to_docx(sample().document(), &WriteOptions::default()).unwrap()).unwrap();
    let headings: Vec<(u8, &str)> = doc
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading(h) => Some((h.level, h.text.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(headings, vec![(1, "I. INTRODUCTION"), (2, "A. Details")]);
}

#[test]
fn test_every_call_order_round_trips() {
    let steps = [
        Step::Heading,
        Step::Paragraph,
        Step::EmptyParagraph,
        Step::Table,
        Step::Equation,
        Step::Bullet,
    ];
    let orders = permutations(&steps);
    assert_eq!(orders.len(), 720);

    let options = WriteOptions::new().stored();
    for (i, order) in orders.iter().enumerate() {
        let mut asm = DocumentAssembler::new();
        // Alternate tables with and without data rows
        for &step in order {
            apply(&mut asm, step, i % 2 == 0);
        }

        let doc = read_bytes(&asm.to_bytes(&options).unwrap()).unwrap();
        assert_eq!(doc.blocks, asm.document().blocks, "order {:?}", order);
    }
}

#[test]
fn test_empty_paragraph_after_table_kept() {
    let mut asm = DocumentAssembler::new();
    apply(&mut asm, Step::Table, false);
    apply(&mut asm, Step::EmptyParagraph, false);
    apply(&mut asm, Step::EmptyParagraph, false);

    let doc = read_bytes(&asm.to_bytes(&WriteOptions::default()).unwrap()).unwrap();
    assert_eq!(doc.blocks.len(), 3);
    assert_eq!(doc.blocks, asm.document().blocks);
}

#[test]
fn test_equation_lookalike_stays_paragraph() {
    let mut asm = DocumentAssembler::new();
    let runs = [TextRun::italic("x"), TextRun::tab(), TextRun::new("(1)")];
    assert!(matches!(
        asm.append_paragraph(EQUATION, runs.clone()),
        Err(Error::ReservedStyle(_))
    ));
    asm.append_paragraph(NORMAL, runs).unwrap();
    asm.append_equation("x", 1).unwrap();

    let doc = read_bytes(&asm.to_bytes(&WriteOptions::default()).unwrap()).unwrap();
    let kinds: Vec<&str> = doc.blocks.iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec!["paragraph", "equation"]);
}

#[test]
fn test_control_character_fails_whole_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.docx");

    let mut asm = sample();
    asm.metadata_mut().title = Some("a\u{0B}b".to_string());
    let result = asm.save(&path);

    assert!(matches!(result, Err(Error::InvalidCharacter(0x0B))));
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_a4_page_moves_equation_tab() {
    let mut asm = DocumentAssembler::new();
    asm.append_equation("E=mc^2", 1).unwrap();
    let options = WriteOptions::new().with_page(PageSetup::a4());

    let doc = read_bytes(&asm.to_bytes(&options).unwrap()).unwrap();
    let tab = doc.styles.get(EQUATION).unwrap().paragraph.right_tab.unwrap();
    assert_eq!(tab, PageSetup::a4().text_width());
    assert!(tab < PageSetup::letter().text_width());
}
