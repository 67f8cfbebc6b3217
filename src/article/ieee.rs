//! IEEE conference style presets.

use crate::assembler::DocumentAssembler;
use crate::error::Result;
use crate::model::{inches, Alignment, FontSpec, ParagraphSpec, Style, NORMAL};

/// Body font used by every preset.
pub const FONT_FAMILY: &str = "Times New Roman";

/// Paper title.
pub const ARTICLE_TITLE: &str = "ArticleTitle";
/// Author line.
pub const AUTHORS: &str = "Authors";
/// Institution and e-mail block.
pub const AFFILIATION: &str = "Affiliation";
/// Roman-numbered section heading.
pub const HEADING_1: &str = "Heading1IEEE";
/// Lettered subsection heading.
pub const HEADING_2: &str = "Heading2IEEE";
/// Caption above a table.
pub const TABLE_CAPTION: &str = "TableCaption";
/// Bibliography entry with hanging indent.
pub const REFERENCE: &str = "Reference";

fn font(size: f32) -> FontSpec {
    FontSpec::new(FONT_FAMILY, size)
}

/// The preset styles, in registration order.
pub fn styles() -> Vec<Style> {
    vec![
        Style::new(NORMAL).with_font(font(10.0)),
        Style::new(ARTICLE_TITLE)
            .with_font(font(22.0).bold())
            .with_paragraph(ParagraphSpec::new().align(Alignment::Center).space_after(12.0)),
        Style::new(AUTHORS)
            .with_font(font(11.0))
            .with_paragraph(ParagraphSpec::new().align(Alignment::Center)),
        Style::new(AFFILIATION)
            .with_font(font(10.0).italic())
            .with_paragraph(ParagraphSpec::new().align(Alignment::Center).space_after(18.0)),
        Style::new(HEADING_1)
            .with_font(font(10.0).all_caps())
            .with_paragraph(ParagraphSpec::new().space_before(12.0).space_after(4.0)),
        Style::new(HEADING_2)
            .with_font(font(10.0).italic())
            .with_paragraph(ParagraphSpec::new().space_before(6.0).space_after(3.0)),
        Style::new(TABLE_CAPTION)
            .with_font(font(8.0).all_caps())
            .with_paragraph(
                ParagraphSpec::new()
                    .align(Alignment::Center)
                    .space_before(10.0)
                    .space_after(2.0),
            ),
        Style::new(REFERENCE)
            .with_font(font(8.0))
            .with_paragraph(ParagraphSpec::new().indent(inches(0.25), inches(-0.25))),
    ]
}

/// Register the presets and route heading levels 1 and 2 to them.
pub fn register_styles(asm: &mut DocumentAssembler) -> Result<()> {
    for style in styles() {
        asm.register_style(style)?;
    }
    asm.map_heading_level(1, HEADING_1)?;
    asm.map_heading_level(2, HEADING_2)?;
    Ok(())
}
