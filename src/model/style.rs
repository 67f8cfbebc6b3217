//! Named styles and the style registry.

use serde::{Deserialize, Serialize};

/// Points per inch (1 point = 1/72 inch).
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert inches to points.
pub fn inches(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

/// Name of the default paragraph style.
pub const NORMAL: &str = "Normal";

/// Name of the built-in bulleted list style.
pub const LIST_BULLET: &str = "List Bullet";

/// Name of the built-in equation line style.
pub const EQUATION: &str = "Equation";

/// Font attributes of a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font family name
    pub family: Option<String>,

    /// Font size in points
    pub size: Option<f32>,

    /// Bold weight
    pub bold: bool,

    /// Italic slant
    pub italic: bool,

    /// Render all letters as capitals
    pub all_caps: bool,
}

impl FontSpec {
    /// Create a font with a family and size.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size: Some(size),
            ..Default::default()
        }
    }

    /// Set bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set all-caps and return self.
    pub fn all_caps(mut self) -> Self {
        self.all_caps = true;
        self
    }
}

/// Paragraph formatting attributes of a style, or direct overrides on a paragraph.
///
/// All lengths are in points. A negative `first_line_indent` produces a hanging indent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphSpec {
    /// Horizontal alignment
    pub alignment: Option<Alignment>,

    /// Space before the paragraph
    pub space_before: Option<f32>,

    /// Space after the paragraph
    pub space_after: Option<f32>,

    /// Left indentation
    pub left_indent: Option<f32>,

    /// First line indentation relative to `left_indent`
    pub first_line_indent: Option<f32>,

    /// Position of a right-aligned tab stop
    pub right_tab: Option<f32>,

    /// Attach bullet numbering
    #[serde(default)]
    pub bullet: bool,
}

impl ParagraphSpec {
    /// Create an empty paragraph format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set space before and return self.
    pub fn space_before(mut self, points: f32) -> Self {
        self.space_before = Some(points);
        self
    }

    /// Set space after and return self.
    pub fn space_after(mut self, points: f32) -> Self {
        self.space_after = Some(points);
        self
    }

    /// Set left and first-line indentation and return self.
    pub fn indent(mut self, left: f32, first_line: f32) -> Self {
        self.left_indent = Some(left);
        self.first_line_indent = Some(first_line);
        self
    }

    /// Set a right tab stop and return self.
    pub fn right_tab(mut self, position: f32) -> Self {
        self.right_tab = Some(position);
        self
    }

    /// Attach bullet numbering and return self.
    pub fn bulleted(mut self) -> Self {
        self.bullet = true;
        self
    }

    /// Check whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// WordprocessingML `w:jc` value.
    pub fn as_jc(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }

    /// Parse a `w:jc` value.
    pub fn from_jc(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// A named formatting preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Display name, referenced by blocks
    pub name: String,

    /// Font attributes
    pub font: FontSpec,

    /// Paragraph attributes
    pub paragraph: ParagraphSpec,

    /// Whether this is one of the defaults every document starts with
    #[serde(default)]
    pub builtin: bool,
}

impl Style {
    /// Create a style with empty formatting.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            font: FontSpec::default(),
            paragraph: ParagraphSpec::default(),
            builtin: false,
        }
    }

    /// Set the font and return self.
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Set the paragraph format and return self.
    pub fn with_paragraph(mut self, paragraph: ParagraphSpec) -> Self {
        self.paragraph = paragraph;
        self
    }

    /// Identifier used inside the package (`List Bullet` -> `ListBullet`).
    pub fn style_id(&self) -> String {
        style_id(&self.name)
    }
}

/// Derive a package style identifier from a style name.
pub fn style_id(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Ordered set of styles, keyed by name.
///
/// Registration order is preserved so the serialized style sheet is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRegistry {
    styles: Vec<Style>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in styles.
    ///
    /// The equation style carries no tab stop; the writer places the number
    /// tab at the page text width.
    pub fn with_builtins() -> Self {
        let builtins = [
            Style::new(NORMAL),
            Style::new("Heading 1")
                .with_font(FontSpec {
                    size: Some(14.0),
                    bold: true,
                    ..Default::default()
                })
                .with_paragraph(ParagraphSpec::new().space_before(12.0).space_after(6.0)),
            Style::new("Heading 2")
                .with_font(FontSpec {
                    size: Some(12.0),
                    bold: true,
                    ..Default::default()
                })
                .with_paragraph(ParagraphSpec::new().space_before(10.0).space_after(4.0)),
            Style::new("Heading 3")
                .with_font(FontSpec {
                    bold: true,
                    italic: true,
                    ..Default::default()
                })
                .with_paragraph(ParagraphSpec::new().space_before(8.0).space_after(2.0)),
            Style::new(LIST_BULLET)
                .with_paragraph(ParagraphSpec::new().indent(18.0, -18.0).bulleted()),
            Style::new(EQUATION).with_paragraph(
                ParagraphSpec::new()
                    .align(Alignment::Left)
                    .space_before(6.0)
                    .space_after(6.0),
            ),
        ];

        Self {
            styles: builtins
                .into_iter()
                .map(|mut style| {
                    style.builtin = true;
                    style
                })
                .collect(),
        }
    }

    /// Get a style by name.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Check if a style is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a style, replacing any style of the same name in place.
    ///
    /// Returns the replaced style.
    pub fn insert(&mut self, style: Style) -> Option<Style> {
        match self.styles.iter_mut().find(|s| s.name == style.name) {
            Some(existing) => Some(std::mem::replace(existing, style)),
            None => {
                self.styles.push(style);
                None
            }
        }
    }

    /// Find a style by its package identifier.
    pub fn by_id(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.style_id() == id)
    }

    /// Iterate styles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Names of all styles in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.styles.iter().map(|s| s.name.as_str()).collect()
    }
}
