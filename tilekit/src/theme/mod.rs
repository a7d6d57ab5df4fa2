//! Matches map elements against a tree of rules to find their render styles.

use std::{collections::HashMap, sync::Arc};

use csscolorparser::Color;
use thiserror::Error;

use crate::{
    coords::ZoomLevel,
    element::{
        GeometryType, Tag, TagSet, KEY_HEIGHT, KEY_HOUSE_NUMBER, KEY_MIN_HEIGHT, KEY_NAME, KEY_REF,
    },
    theme::{
        rule::{zoom_bit, ClosedMask, ElementMask, MatchQuery, Rule},
        style::{RenderStyle, StyleId},
    },
};

pub mod builder;
pub mod description;
pub mod matcher;
pub mod rule;
pub mod style;

pub use builder::{RuleBuilder, ThemeBuilder};

/// Default number of cached match results per [`ThemeMatcher`].
pub const DEFAULT_MATCH_CACHE_CAPACITY: usize = 512;

/// Keys whose values are replaced by placeholders before matching and caching.
const FILTERED_KEYS: [&str; 5] = [KEY_NAME, KEY_HOUSE_NUMBER, KEY_REF, KEY_HEIGHT, KEY_MIN_HEIGHT];

/// Errors while building a theme. They are fatal for the theme as a whole.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("rule is missing the required attribute {0:?}")]
    MissingAttribute(&'static str),
    #[error("zoom level {0} is negative")]
    NegativeZoom(i32),
    #[error("zoom-min {min} is larger than zoom-max {max}")]
    InvalidZoomRange { min: i32, max: i32 },
    #[error("style {0:?} is not defined")]
    UnknownStyle(String),
    #[error("style id {0} is not registered")]
    UnknownStyleId(u32),
    #[error("failed to parse theme description")]
    Parse(#[from] serde_json::Error),
}

/// A frozen rule tree together with the styles it references. Read-only after construction and
/// shared between worker threads.
#[derive(Debug)]
pub struct Theme {
    rules: Vec<Rule>,
    styles: Vec<RenderStyle>,
    levels: u32,
    map_background: Color,
}

impl Theme {
    pub fn from_json_str(json: &str) -> Result<Self, ThemeError> {
        description::ThemeDescription::from_json_str(json)?.build()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn style(&self, id: StyleId) -> Option<&RenderStyle> {
        self.styles.get(id.index())
    }

    pub fn styles(&self) -> &[RenderStyle] {
        &self.styles
    }

    /// Number of render levels used by the styles of this theme.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn map_background(&self) -> &Color {
        &self.map_background
    }

    /// Collects the styles of all matching rules in depth-first order. A style reached through
    /// several rules is reported once.
    pub fn match_element(
        &self,
        geometry_type: GeometryType,
        tags: &[Tag],
        zoom: ZoomLevel,
        out: &mut Vec<StyleId>,
    ) {
        out.clear();
        let Some(query) = Self::query(geometry_type, zoom) else {
            return;
        };

        for rule in &self.rules {
            rule.match_element(&query, tags, out);
        }
        remove_duplicates(out);
    }

    fn query(geometry_type: GeometryType, zoom: ZoomLevel) -> Option<MatchQuery> {
        let (element, closed) = match geometry_type {
            GeometryType::None => return None,
            GeometryType::Point => (ElementMask::NODE, ClosedMask::ANY),
            GeometryType::Line => (ElementMask::WAY, ClosedMask::NO),
            GeometryType::Polygon => (ElementMask::WAY, ClosedMask::YES),
        };

        Some(MatchQuery {
            element,
            closed,
            zoom: zoom_bit(zoom.into()),
        })
    }
}

fn remove_duplicates(styles: &mut Vec<StyleId>) {
    let mut seen = 0;
    for i in 0..styles.len() {
        let style = styles[i];
        if !styles[..seen].contains(&style) {
            styles[seen] = style;
            seen += 1;
        }
    }
    styles.truncate(seen);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    geometry_type: GeometryType,
    tags: Vec<Tag>,
}

#[derive(Debug)]
struct CacheEntry {
    zoom_mask: u32,
    styles: Arc<[StyleId]>,
}

/// Per-worker front end of a [`Theme`]. Results are cached by geometry type and filtered tags;
/// one cache entry holds a result per distinct style list together with the zoom levels it was
/// seen at.
pub struct ThemeMatcher {
    theme: Arc<Theme>,
    capacity: usize,
    cache: HashMap<CacheKey, Vec<CacheEntry>>,
    filtered: Vec<Tag>,
    scratch: Vec<StyleId>,
}

impl ThemeMatcher {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self::with_capacity(theme, DEFAULT_MATCH_CACHE_CAPACITY)
    }

    pub fn with_capacity(theme: Arc<Theme>, capacity: usize) -> Self {
        Self {
            theme,
            capacity: capacity.max(1),
            cache: HashMap::new(),
            filtered: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn match_element(
        &mut self,
        geometry_type: GeometryType,
        tags: &TagSet,
        zoom: ZoomLevel,
    ) -> Arc<[StyleId]> {
        filter_tags(tags, &mut self.filtered);
        let bit = zoom_bit(zoom.into());

        let key = CacheKey {
            geometry_type,
            tags: std::mem::take(&mut self.filtered),
        };
        if let Some(entries) = self.cache.get(&key) {
            if let Some(entry) = entries.iter().find(|entry| entry.zoom_mask & bit != 0) {
                let styles = entry.styles.clone();
                self.filtered = key.tags;
                return styles;
            }
        }

        self.theme
            .match_element(geometry_type, &key.tags, zoom, &mut self.scratch);

        if !self.cache.contains_key(&key) && self.cache.len() >= self.capacity {
            log::debug!("match cache full with {} entries, clearing", self.cache.len());
            self.cache.clear();
        }

        let entries = self.cache.entry(key).or_default();
        if let Some(entry) = entries
            .iter_mut()
            .find(|entry| *entry.styles == *self.scratch)
        {
            entry.zoom_mask |= bit;
            return entry.styles.clone();
        }

        let styles: Arc<[StyleId]> = Arc::from(self.scratch.as_slice());
        entries.push(CacheEntry {
            zoom_mask: bit,
            styles: styles.clone(),
        });
        styles
    }
}

/// Copies `tags` into `out`, replacing the values of per-feature keys by key-only placeholders
/// so that elements differing only in their names share cache entries.
pub fn filter_tags(tags: &TagSet, out: &mut Vec<Tag>) {
    out.clear();
    out.extend(tags.iter().map(|tag| {
        if FILTERED_KEYS.contains(&tag.key.as_ref()) {
            Tag::key_only(tag.key.clone())
        } else {
            tag.clone()
        }
    }));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        coords::ZoomLevel,
        element::{GeometryType, Tag, TagSet},
        theme::{
            rule::{ClosedMask, ElementMask},
            style::{AreaStyle, LineStyle, RenderStyle, StyleId},
            RuleBuilder, Theme, ThemeBuilder, ThemeMatcher,
        },
    };

    fn black() -> csscolorparser::Color {
        csscolorparser::Color::new(0.0, 0.0, 0.0, 1.0)
    }

    fn line() -> RenderStyle {
        RenderStyle::Line(LineStyle::new(black(), 1.0))
    }

    fn tags(list: &[(&'static str, &'static str)]) -> TagSet {
        list.iter().map(|(k, v)| Tag::fixed(k, v)).collect()
    }

    fn matches(theme: &Theme, geometry_type: GeometryType, tags: &TagSet, zoom: u8) -> Vec<StyleId> {
        let mut out = Vec::new();
        theme.match_element(geometry_type, tags.as_slice(), ZoomLevel::new(zoom), &mut out);
        out
    }

    #[test]
    fn test_zoom_range() {
        let theme = ThemeBuilder::new()
            .rule(
                RuleBuilder::new(ElementMask::WAY)
                    .keys("highway")
                    .values("*")
                    .zoom(5, 8)
                    .style(line()),
            )
            .build()
            .unwrap();
        let road = tags(&[("highway", "primary")]);

        for zoom in 5..=8 {
            assert_eq!(matches(&theme, GeometryType::Line, &road, zoom).len(), 1);
        }
        assert!(matches(&theme, GeometryType::Line, &road, 4).is_empty());
        assert!(matches(&theme, GeometryType::Line, &road, 9).is_empty());
    }

    #[test]
    fn test_parent_gates_children() {
        let theme = ThemeBuilder::new()
            .rule(
                RuleBuilder::new(ElementMask::WAY)
                    .keys("highway")
                    .values("*")
                    .style(line())
                    .child(
                        RuleBuilder::new(ElementMask::WAY)
                            .keys("bridge")
                            .values("yes")
                            .style(line()),
                    )
                    .child(
                        RuleBuilder::new(ElementMask::WAY)
                            .keys("highway")
                            .values("primary")
                            .style(line()),
                    ),
            )
            .rule(
                RuleBuilder::new(ElementMask::WAY)
                    .keys("railway")
                    .values("*")
                    .child(
                        RuleBuilder::new(ElementMask::WAY)
                            .keys("bridge")
                            .values("yes")
                            .style(line()),
                    ),
            )
            .build()
            .unwrap();

        let result = matches(
            &theme,
            GeometryType::Line,
            &tags(&[("highway", "primary")]),
            14,
        );
        assert_eq!(result, vec![StyleId(0), StyleId(2)]);

        let bridge = matches(&theme, GeometryType::Line, &tags(&[("bridge", "yes")]), 14);
        assert!(bridge.is_empty());
    }

    #[test]
    fn test_select_first_child() {
        let theme = ThemeBuilder::new()
            .rule(
                RuleBuilder::new(ElementMask::WAY)
                    .keys("highway")
                    .values("*")
                    .select_first()
                    .style(line())
                    .child(
                        RuleBuilder::new(ElementMask::WAY)
                            .keys("highway")
                            .values("primary|secondary")
                            .style(line()),
                    )
                    .child(
                        RuleBuilder::new(ElementMask::WAY)
                            .keys("highway")
                            .values("primary")
                            .style(line()),
                    ),
            )
            .build()
            .unwrap();

        let primary = matches(&theme, GeometryType::Line, &tags(&[("highway", "primary")]), 14);
        assert_eq!(primary, vec![StyleId(0), StyleId(1)]);

        let track = matches(&theme, GeometryType::Line, &tags(&[("highway", "track")]), 14);
        assert!(track.is_empty());
    }

    #[test]
    fn test_element_and_closed() {
        let theme = ThemeBuilder::new()
            .rule(
                RuleBuilder::new(ElementMask::WAY)
                    .keys("natural")
                    .values("water")
                    .closed(ClosedMask::YES)
                    .style(RenderStyle::Area(AreaStyle::new(black()))),
            )
            .build()
            .unwrap();
        let water = tags(&[("natural", "water")]);

        assert_eq!(matches(&theme, GeometryType::Polygon, &water, 14).len(), 1);
        assert!(matches(&theme, GeometryType::Line, &water, 14).is_empty());
        assert!(matches(&theme, GeometryType::Point, &water, 14).is_empty());
    }

    #[test]
    fn test_duplicate_styles_removed() {
        let mut builder = ThemeBuilder::new();
        let shared = builder.add_style(line()).unwrap();
        let theme = builder
            .rule(
                RuleBuilder::new(ElementMask::ANY)
                    .keys("highway")
                    .values("*")
                    .shared_style(shared),
            )
            .rule(
                RuleBuilder::new(ElementMask::ANY)
                    .keys("*")
                    .values("primary")
                    .shared_style(shared),
            )
            .build()
            .unwrap();

        let result = matches(
            &theme,
            GeometryType::Line,
            &tags(&[("highway", "primary")]),
            14,
        );
        assert_eq!(result, vec![shared]);
    }

    #[test]
    fn test_cached_matcher() {
        let theme = ThemeBuilder::new()
            .rule(
                RuleBuilder::new(ElementMask::WAY)
                    .keys("highway")
                    .values("*")
                    .zoom(10, 20)
                    .style(line()),
            )
            .build()
            .unwrap();
        let mut matcher = ThemeMatcher::with_capacity(Arc::new(theme), 2);

        let mut first = TagSet::new();
        first.push(Tag::fixed("highway", "primary")).unwrap();
        first.push(Tag::new("name", "Ring", true)).unwrap();
        let mut second = TagSet::new();
        second.push(Tag::fixed("highway", "primary")).unwrap();
        second.push(Tag::new("name", "Allee", true)).unwrap();

        let a = matcher.match_element(GeometryType::Line, &first, ZoomLevel::new(14));
        let b = matcher.match_element(GeometryType::Line, &second, ZoomLevel::new(15));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(matcher.cached_entries(), 1);

        assert!(matcher
            .match_element(GeometryType::Line, &first, ZoomLevel::new(5))
            .is_empty());

        matcher.match_element(GeometryType::Polygon, &first, ZoomLevel::new(14));
        matcher.match_element(GeometryType::Point, &first, ZoomLevel::new(14));
        assert_eq!(matcher.cached_entries(), 1);
    }
}
