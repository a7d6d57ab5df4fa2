//! Render styles are the instructions a matching rule attaches to an element.

use csscolorparser::Color;
use serde::{Deserialize, Serialize};

/// Identifies a style within its [`crate::theme::Theme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StyleId(pub(crate) u32);

impl StyleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

fn default_color() -> Color {
    Color::new(0.0, 0.0, 0.0, 1.0)
}

fn transparent() -> Color {
    Color::new(0.0, 0.0, 0.0, 0.0)
}

fn default_width() -> f32 {
    1.0
}

fn default_font_size() -> f32 {
    12.0
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct LineStyle {
    #[serde(skip)]
    pub level: u32,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default = "default_width")]
    pub width: f32,
    /// The width is not scaled with zoom and latitude.
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub cap: LineCap,
    /// Drawn as the outline of the line bucket preceding it.
    #[serde(default)]
    pub outline: bool,
    /// Length of one dash in pixels, zero for solid lines.
    #[serde(default)]
    pub stipple: u32,
    #[serde(default = "transparent")]
    pub stipple_color: Color,
    #[serde(default)]
    pub stipple_width: f32,
    /// Zoom level from which the line fades in, -1 for never.
    #[serde(default = "LineStyle::no_fade")]
    pub fade: i32,
    #[serde(default)]
    pub blur: f32,
    /// Minimum scaled width.
    #[serde(default)]
    pub min: f32,
}

impl LineStyle {
    fn no_fade() -> i32 {
        -1
    }

    pub fn new(color: Color, width: f32) -> Self {
        Self {
            level: 0,
            color,
            width,
            fixed: false,
            cap: LineCap::default(),
            outline: false,
            stipple: 0,
            stipple_color: transparent(),
            stipple_width: 0.0,
            fade: Self::no_fade(),
            blur: 0.0,
            min: 0.0,
        }
    }

    pub fn is_stippled(&self) -> bool {
        self.stipple > 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AreaStyle {
    #[serde(skip)]
    pub level: u32,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default = "AreaStyle::no_fade")]
    pub fade: i32,
    /// Drawn on the level above the fill.
    #[serde(default)]
    pub outline: Option<LineStyle>,
}

impl AreaStyle {
    fn no_fade() -> i32 {
        -1
    }

    pub fn new(color: Color) -> Self {
        Self {
            level: 0,
            color,
            fade: Self::no_fade(),
            outline: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CircleStyle {
    #[serde(skip)]
    pub level: u32,
    #[serde(default = "default_width")]
    pub radius: f32,
    #[serde(default = "default_color")]
    pub fill: Color,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default)]
    pub stroke_width: f32,
    #[serde(default)]
    pub scale_radius: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SymbolStyle {
    #[serde(default)]
    pub src: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct LineSymbolStyle {
    #[serde(default)]
    pub src: String,
    #[serde(default = "default_true")]
    pub repeat: bool,
    #[serde(default)]
    pub align_center: bool,
    /// Lines with fewer points are not decorated.
    #[serde(default)]
    pub min_points: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TextStyle {
    /// Tag key whose value is drawn.
    #[serde(default, rename = "k")]
    pub key: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_color")]
    pub fill: Color,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default)]
    pub stroke_width: f32,
    /// Captions are drawn below point symbols instead of along ways.
    #[serde(default)]
    pub caption: bool,
    #[serde(default)]
    pub dy: f32,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub min_points: usize,
}

impl TextStyle {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            font_size: default_font_size(),
            fill: default_color(),
            stroke: None,
            stroke_width: 0.0,
            caption: false,
            dy: 0.0,
            priority: 0,
            min_points: 0,
        }
    }

    pub fn has_outline(&self) -> bool {
        self.stroke.is_some() && self.stroke_width > 0.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ExtrusionStyle {
    #[serde(skip)]
    pub level: u32,
    #[serde(default = "ExtrusionStyle::default_side")]
    pub side_color: Color,
    #[serde(default = "ExtrusionStyle::default_top")]
    pub top_color: Color,
    #[serde(default = "ExtrusionStyle::default_line")]
    pub line_color: Color,
}

impl ExtrusionStyle {
    fn default_side() -> Color {
        Color::new(0.86, 0.82, 0.78, 0.9)
    }

    fn default_top() -> Color {
        Color::new(0.94, 0.92, 0.9, 0.9)
    }

    fn default_line() -> Color {
        Color::new(0.5, 0.5, 0.5, 0.9)
    }
}

impl Default for ExtrusionStyle {
    fn default() -> Self {
        Self {
            level: 0,
            side_color: Self::default_side(),
            top_color: Self::default_top(),
            line_color: Self::default_line(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RenderStyle {
    Line(LineStyle),
    Area(AreaStyle),
    Circle(CircleStyle),
    Symbol(SymbolStyle),
    LineSymbol(LineSymbolStyle),
    Text(TextStyle),
    Extrusion(ExtrusionStyle),
}

impl RenderStyle {
    pub fn level(&self) -> Option<u32> {
        match self {
            RenderStyle::Line(line) => Some(line.level),
            RenderStyle::Area(area) => Some(area.level),
            RenderStyle::Circle(circle) => Some(circle.level),
            RenderStyle::Extrusion(extrusion) => Some(extrusion.level),
            RenderStyle::Symbol(_) | RenderStyle::LineSymbol(_) | RenderStyle::Text(_) => None,
        }
    }

    /// Number of render levels this style occupies.
    pub(crate) fn level_count(&self) -> u32 {
        match self {
            RenderStyle::Area(AreaStyle {
                outline: Some(_), ..
            }) => 2,
            style if style.level().is_some() => 1,
            _ => 0,
        }
    }

    /// Assigns `level` to the style and returns the next free level.
    pub(crate) fn assign_level(&mut self, level: u32) -> u32 {
        match self {
            RenderStyle::Line(line) => line.level = level,
            RenderStyle::Area(area) => {
                area.level = level;
                if let Some(outline) = &mut area.outline {
                    outline.level = level + 1;
                }
            }
            RenderStyle::Circle(circle) => circle.level = level,
            RenderStyle::Extrusion(extrusion) => extrusion.level = level,
            RenderStyle::Symbol(_) | RenderStyle::LineSymbol(_) | RenderStyle::Text(_) => {}
        }
        level + self.level_count()
    }
}

#[cfg(test)]
mod tests {
    use crate::theme::style::{AreaStyle, LineCap, LineStyle, RenderStyle};

    #[test]
    fn test_deserialize() {
        let style: RenderStyle = serde_json::from_str(
            r##"{"type": "line", "color": "#ff0000", "width": 2.5, "cap": "butt", "stipple": 4}"##,
        )
        .unwrap();

        let RenderStyle::Line(line) = style else {
            panic!("expected a line style");
        };
        assert_eq!(line.color.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(line.width, 2.5);
        assert_eq!(line.cap, LineCap::Butt);
        assert!(line.is_stippled());
        assert_eq!(line.fade, -1);
    }

    #[test]
    fn test_assign_level() {
        let mut area = AreaStyle::new(csscolorparser::Color::new(0.0, 0.0, 1.0, 1.0));
        area.outline = Some(LineStyle::new(csscolorparser::Color::new(0.0, 0.0, 0.0, 1.0), 1.0));
        let mut style = RenderStyle::Area(area);

        assert_eq!(style.assign_level(3), 5);
        let RenderStyle::Area(area) = style else {
            unreachable!()
        };
        assert_eq!(area.level, 3);
        assert_eq!(area.outline.map(|line| line.level), Some(4));
    }
}
