//! JSON theme descriptions.
//!
//! ```json
//! {
//!   "map-background": "#f8f4f0",
//!   "styles": { "road": { "type": "line", "color": "#ffffff", "width": 2.0 } },
//!   "rules": [
//!     { "e": "way", "k": "highway", "v": "*", "zoom-min": 10, "styles": [{ "use": "road" }] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use csscolorparser::Color;
use serde::{Deserialize, Serialize};

use crate::theme::{
    builder::{RuleBuilder, ThemeBuilder},
    rule::{ClosedMask, ElementMask},
    style::{RenderStyle, StyleId},
    Theme, ThemeError,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    #[default]
    Any,
}

impl From<ElementKind> for ElementMask {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Node => ElementMask::NODE,
            ElementKind::Way => ElementMask::WAY,
            ElementKind::Any => ElementMask::ANY,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClosedKind {
    Yes,
    No,
    #[default]
    Any,
}

impl From<ClosedKind> for ClosedMask {
    fn from(kind: ClosedKind) -> Self {
        match kind {
            ClosedKind::Yes => ClosedMask::YES,
            ClosedKind::No => ClosedMask::NO,
            ClosedKind::Any => ClosedMask::ANY,
        }
    }
}

/// How the children of a rule are visited.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    #[default]
    All,
    First,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum StyleEntry {
    /// Reference to a named style of [`ThemeDescription::styles`].
    Use {
        #[serde(rename = "use")]
        name: String,
    },
    Inline(RenderStyle),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct RuleDescription {
    #[serde(default)]
    pub e: ElementKind,
    #[serde(default)]
    pub k: Option<String>,
    #[serde(default)]
    pub v: Option<String>,
    #[serde(default)]
    pub closed: ClosedKind,
    #[serde(default)]
    pub zoom_min: i32,
    #[serde(default = "RuleDescription::default_zoom_max")]
    pub zoom_max: i32,
    #[serde(default)]
    pub select: Selector,
    #[serde(default)]
    pub styles: Vec<StyleEntry>,
    #[serde(default)]
    pub rules: Vec<RuleDescription>,
}

impl RuleDescription {
    fn default_zoom_max() -> i32 {
        i32::from(u8::MAX)
    }

    fn into_builder(
        self,
        named: &BTreeMap<String, StyleId>,
    ) -> Result<RuleBuilder, ThemeError> {
        let mut rule = RuleBuilder::new(self.e.into())
            .closed(self.closed.into())
            .zoom(self.zoom_min, self.zoom_max);
        if let Some(keys) = &self.k {
            rule = rule.keys(keys);
        }
        if let Some(values) = &self.v {
            rule = rule.values(values);
        }
        if self.select == Selector::First {
            rule = rule.select_first();
        }

        for style in self.styles {
            rule = match style {
                StyleEntry::Use { name } => {
                    let id = named
                        .get(&name)
                        .copied()
                        .ok_or(ThemeError::UnknownStyle(name))?;
                    rule.shared_style(id)
                }
                StyleEntry::Inline(style) => rule.style(style),
            };
        }

        for child in self.rules {
            rule = rule.child(child.into_builder(named)?);
        }
        Ok(rule)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ThemeDescription {
    #[serde(default)]
    pub map_background: Option<Color>,
    /// Styles shared between rules. They receive their levels before any inline style.
    #[serde(default)]
    pub styles: BTreeMap<String, RenderStyle>,
    #[serde(default)]
    pub rules: Vec<RuleDescription>,
}

impl ThemeDescription {
    pub fn from_json_str(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn build(self) -> Result<Theme, ThemeError> {
        let mut builder = ThemeBuilder::new();
        if let Some(color) = self.map_background {
            builder = builder.map_background(color);
        }

        let mut named = BTreeMap::new();
        for (name, style) in self.styles {
            named.insert(name, builder.add_style(style)?);
        }

        for rule in self.rules {
            builder = builder.rule(rule.into_builder(&named)?);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        coords::ZoomLevel,
        element::{GeometryType, Tag, TagSet},
        theme::{style::RenderStyle, Theme, ThemeError},
    };

    const THEME: &str = r##"{
        "map-background": "#f8f4f0",
        "styles": {
            "road": { "type": "line", "color": "#ffffff", "width": 2.0 }
        },
        "rules": [
            { "e": "way", "k": "natural", "v": "water", "closed": "yes",
              "styles": [{ "type": "area", "color": "#a0c8f0" }] },
            { "e": "way", "k": "highway", "v": "*", "zoom-min": 10,
              "styles": [{ "use": "road" }],
              "rules": [
                  { "k": "*", "v": "*",
                    "styles": [{ "type": "text", "k": "name", "font-size": 14.0, "min-points": 3 }] }
              ] }
        ]
    }"##;

    #[test]
    fn test_parse_theme() {
        let theme = Theme::from_json_str(THEME).unwrap();

        assert_eq!(theme.rules().len(), 2);
        assert_eq!(theme.levels(), 2);
        assert_eq!(theme.map_background().to_rgba8(), [0xf8, 0xf4, 0xf0, 0xff]);

        let road: TagSet = [Tag::fixed("highway", "residential")].into_iter().collect();
        let mut out = Vec::new();
        theme.match_element(GeometryType::Line, road.as_slice(), ZoomLevel::new(14), &mut out);
        assert_eq!(out.len(), 2);
        assert!(matches!(theme.style(out[0]), Some(RenderStyle::Line(line)) if line.level == 0));
        assert!(
            matches!(theme.style(out[1]), Some(RenderStyle::Text(text)) if text.min_points == 3)
        );

        theme.match_element(GeometryType::Line, road.as_slice(), ZoomLevel::new(9), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_select_first() {
        let theme = Theme::from_json_str(
            r##"{
            "rules": [
                { "e": "way", "k": "highway", "v": "*", "select": "first",
                  "styles": [{ "type": "line", "color": "#000000", "width": 3.0 }],
                  "rules": [
                      { "k": "bridge", "v": "yes",
                        "styles": [{ "type": "line", "color": "#ff0000", "width": 2.0 }] },
                      { "k": "highway", "v": "*",
                        "styles": [{ "type": "line", "color": "#ffffff", "width": 1.0 }] }
                  ] }
            ]
        }"##,
        )
        .unwrap();
        assert!(theme.rules()[0].match_first());

        let bridge: TagSet = [Tag::fixed("highway", "primary"), Tag::fixed("bridge", "yes")]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        theme.match_element(GeometryType::Line, bridge.as_slice(), ZoomLevel::new(14), &mut out);
        let widths: Vec<_> = out
            .iter()
            .filter_map(|id| match theme.style(*id) {
                Some(RenderStyle::Line(line)) => Some(line.width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![3.0, 2.0]);
    }

    #[test]
    fn test_unknown_style() {
        let result = Theme::from_json_str(
            r#"{ "rules": [{ "k": "highway", "v": "*", "styles": [{ "use": "missing" }] }] }"#,
        );
        assert!(matches!(result, Err(ThemeError::UnknownStyle(name)) if name == "missing"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Theme::from_json_str("{ \"rules\": 3 }"),
            Err(ThemeError::Parse(_))
        ));
    }
}
