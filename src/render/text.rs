//! Plain text and outline rendering.

use crate::model::{Block, Document};

/// Convert a document to plain text, one block per paragraph.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text().trim().to_string()
}

/// One line per block: position, kind, style and a short summary.
pub fn outline(doc: &Document) -> String {
    let mut output = String::new();

    for (i, block) in doc.blocks.iter().enumerate() {
        let summary = match block {
            Block::Heading(h) => {
                let indent = "  ".repeat((h.level as usize).saturating_sub(1));
                format!("{}{}", indent, h.text)
            }
            Block::Paragraph(p) => truncate(&p.plain_text(), 60),
            Block::Table(t) => format!(
                "{} ({} columns, 1 header row, {} data rows)",
                truncate(&t.caption, 40),
                t.column_count(),
                t.row_count()
            ),
            Block::Equation(e) => format!("{} {}", e.expression, e.label()),
        };
        output.push_str(&format!(
            "{:>4}  {:<9} {:<14} {}\n",
            i + 1,
            block.kind(),
            block.style(),
            summary
        ));
    }

    output
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace(['\n', '\t'], " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let head: String = single_line.chars().take(max_chars - 1).collect();
    format!("{}…", head)
}
