//! Validates rule definitions and freezes them into a [`Theme`].

use std::{collections::HashMap, sync::Arc};

use csscolorparser::Color;

use crate::theme::{
    matcher::{AttributeMatcher, STRING_EXCLUSIVE, STRING_NEGATION, STRING_WILDCARD},
    rule::{zoom_mask, ClosedMask, ElementMask, Rule, RuleMatcher},
    style::{RenderStyle, StyleId},
    Theme, ThemeError,
};

const SEPARATOR: char = '|';

enum StyleRef {
    Inline(RenderStyle),
    Shared(StyleId),
}

/// Definition of one rule and its children.
pub struct RuleBuilder {
    element: ElementMask,
    closed: ClosedMask,
    keys: Option<String>,
    values: Option<String>,
    zoom_min: i32,
    zoom_max: i32,
    styles: Vec<StyleRef>,
    children: Vec<RuleBuilder>,
    match_first: bool,
}

impl RuleBuilder {
    pub fn new(element: ElementMask) -> Self {
        Self {
            element,
            closed: ClosedMask::ANY,
            keys: None,
            values: None,
            zoom_min: 0,
            zoom_max: i32::from(u8::MAX),
            styles: Vec::new(),
            children: Vec::new(),
            match_first: false,
        }
    }

    /// `|` separated list of keys, `*` for any.
    pub fn keys(mut self, keys: &str) -> Self {
        self.keys = Some(keys.to_string());
        self
    }

    /// `|` separated list of values. `*` matches any value, a `~` entry turns the rule into a
    /// negation and a `-` entry into an exclusion.
    pub fn values(mut self, values: &str) -> Self {
        self.values = Some(values.to_string());
        self
    }

    pub fn closed(mut self, closed: ClosedMask) -> Self {
        self.closed = closed;
        self
    }

    pub fn zoom(mut self, min: i32, max: i32) -> Self {
        self.zoom_min = min;
        self.zoom_max = max;
        self
    }

    pub fn style(mut self, style: RenderStyle) -> Self {
        self.styles.push(StyleRef::Inline(style));
        self
    }

    /// References a style registered with [`ThemeBuilder::add_style`].
    pub fn shared_style(mut self, id: StyleId) -> Self {
        self.styles.push(StyleRef::Shared(id));
        self
    }

    /// Stops at the first matching child. The styles of this rule are only emitted together
    /// with that child's.
    pub fn select_first(mut self) -> Self {
        self.match_first = true;
        self
    }

    pub fn child(mut self, child: RuleBuilder) -> Self {
        self.children.push(child);
        self
    }

    fn validate(&self) -> Result<(u8, u8, &str, &str), ThemeError> {
        let keys = self
            .keys
            .as_deref()
            .ok_or(ThemeError::MissingAttribute("k"))?;
        let values = self
            .values
            .as_deref()
            .ok_or(ThemeError::MissingAttribute("v"))?;

        if self.zoom_min < 0 {
            return Err(ThemeError::NegativeZoom(self.zoom_min));
        }
        if self.zoom_max < 0 {
            return Err(ThemeError::NegativeZoom(self.zoom_max));
        }
        if self.zoom_min > self.zoom_max {
            return Err(ThemeError::InvalidZoomRange {
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }

        let min = u8::try_from(self.zoom_min).unwrap_or(u8::MAX);
        let max = u8::try_from(self.zoom_max).unwrap_or(u8::MAX);
        Ok((min, max, keys, values))
    }
}

/// Collects styles and rules. Matchers for identical key or value lists are shared between
/// rules.
pub struct ThemeBuilder {
    styles: Vec<RenderStyle>,
    next_level: u32,
    rules: Vec<RuleBuilder>,
    map_background: Color,
    key_matchers: HashMap<Vec<String>, Arc<AttributeMatcher>>,
    value_matchers: HashMap<Vec<String>, Arc<AttributeMatcher>>,
    any: Arc<AttributeMatcher>,
}

impl Default for ThemeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeBuilder {
    pub fn new() -> Self {
        Self {
            styles: Vec::new(),
            next_level: 0,
            rules: Vec::new(),
            map_background: Color::new(1.0, 1.0, 1.0, 1.0),
            key_matchers: HashMap::new(),
            value_matchers: HashMap::new(),
            any: Arc::new(AttributeMatcher::Any),
        }
    }

    pub fn map_background(mut self, color: Color) -> Self {
        self.map_background = color;
        self
    }

    /// Registers a style that can be shared by several rules. Levels are handed out in
    /// registration order.
    pub fn add_style(&mut self, mut style: RenderStyle) -> Result<StyleId, ThemeError> {
        match &style {
            RenderStyle::Text(text) if text.key.is_empty() => {
                return Err(ThemeError::MissingAttribute("k"))
            }
            RenderStyle::Symbol(symbol) if symbol.src.is_empty() => {
                return Err(ThemeError::MissingAttribute("src"))
            }
            RenderStyle::LineSymbol(symbol) if symbol.src.is_empty() => {
                return Err(ThemeError::MissingAttribute("src"))
            }
            _ => {}
        }

        self.next_level = style.assign_level(self.next_level);
        let id = StyleId(self.styles.len() as u32);
        self.styles.push(style);
        Ok(id)
    }

    pub fn rule(mut self, rule: RuleBuilder) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(mut self) -> Result<Theme, ThemeError> {
        let definitions = std::mem::take(&mut self.rules);
        let mut ancestors = Vec::new();
        let mut rules = Vec::with_capacity(definitions.len());
        for definition in definitions {
            rules.push(self.build_rule(definition, &mut ancestors)?);
        }

        log::debug!(
            "built theme with {} rules, {} styles and {} levels",
            rules.len(),
            self.styles.len(),
            self.next_level
        );

        Ok(Theme {
            rules,
            styles: self.styles,
            levels: self.next_level,
            map_background: self.map_background,
        })
    }

    fn build_rule(
        &mut self,
        definition: RuleBuilder,
        ancestors: &mut Vec<RuleMatcher>,
    ) -> Result<Rule, ThemeError> {
        let (min, max, keys, values) = definition.validate()?;
        let matcher = self.create_matcher(keys, values, ancestors);

        let mut styles = Vec::with_capacity(definition.styles.len());
        for style in definition.styles {
            let id = match style {
                StyleRef::Inline(style) => self.add_style(style)?,
                StyleRef::Shared(id) if id.index() < self.styles.len() => id,
                StyleRef::Shared(id) => return Err(ThemeError::UnknownStyleId(id.0)),
            };
            styles.push(id);
        }

        ancestors.push(matcher.clone());
        let mut children = Vec::with_capacity(definition.children.len());
        for child in definition.children {
            match self.build_rule(child, ancestors) {
                Ok(child) => children.push(child),
                Err(err) => {
                    ancestors.pop();
                    return Err(err);
                }
            }
        }
        ancestors.pop();

        Ok(Rule {
            element: definition.element,
            closed: definition.closed,
            zoom: zoom_mask(min, max),
            matcher,
            styles,
            children,
            match_first: definition.match_first,
        })
    }

    fn create_matcher(
        &mut self,
        keys: &str,
        values: &str,
        ancestors: &[RuleMatcher],
    ) -> RuleMatcher {
        let key_list: Vec<String> = keys.split(SEPARATOR).map(str::to_string).collect();
        let value_list: Vec<String> = values.split(SEPARATOR).map(str::to_string).collect();

        let negation = value_list.iter().any(|v| v == STRING_NEGATION);
        let exclusion = value_list.iter().any(|v| v == STRING_EXCLUSIVE);
        if negation || exclusion {
            let values = value_list
                .into_iter()
                .filter(|v| v != STRING_NEGATION && v != STRING_EXCLUSIVE)
                .collect();
            return RuleMatcher::Negative(Arc::new(AttributeMatcher::Negative {
                keys: key_list,
                values,
                exclusive: exclusion,
            }));
        }

        let key = self.key_matcher(key_list);
        let value = self.value_matcher(value_list);

        let key = Self::optimize(key, &self.any, ancestors, |matcher| match matcher {
            RuleMatcher::Positive { key, .. } => Some(key),
            RuleMatcher::Negative(_) => None,
        });
        let value = Self::optimize(value, &self.any, ancestors, |matcher| match matcher {
            RuleMatcher::Positive { value, .. } => Some(value),
            RuleMatcher::Negative(_) => None,
        });

        RuleMatcher::Positive { key, value }
    }

    /// Replaces `matcher` by `Any` if an ancestor already guarantees it.
    fn optimize(
        matcher: Arc<AttributeMatcher>,
        any: &Arc<AttributeMatcher>,
        ancestors: &[RuleMatcher],
        select: impl Fn(&RuleMatcher) -> Option<&Arc<AttributeMatcher>>,
    ) -> Arc<AttributeMatcher> {
        if matcher.is_any() {
            return matcher;
        }

        let implied = ancestors
            .iter()
            .filter_map(select)
            .any(|ancestor| matcher.is_implied_by(ancestor));
        if implied {
            any.clone()
        } else {
            matcher
        }
    }

    fn key_matcher(&mut self, keys: Vec<String>) -> Arc<AttributeMatcher> {
        if keys.iter().any(|key| key == STRING_WILDCARD) {
            return self.any.clone();
        }

        self.key_matchers
            .entry(keys)
            .or_insert_with_key(|keys| {
                Arc::new(match keys.as_slice() {
                    [key] => AttributeMatcher::SingleKey(key.clone()),
                    _ => AttributeMatcher::MultiKey(keys.clone()),
                })
            })
            .clone()
    }

    fn value_matcher(&mut self, values: Vec<String>) -> Arc<AttributeMatcher> {
        if values.iter().any(|value| value == STRING_WILDCARD) {
            return self.any.clone();
        }

        self.value_matchers
            .entry(values)
            .or_insert_with_key(|values| {
                Arc::new(match values.as_slice() {
                    [value] => AttributeMatcher::SingleValue(value.clone()),
                    _ => AttributeMatcher::MultiValue(values.clone()),
                })
            })
            .clone()
    }
}
