//! The frozen rule tree.

use std::sync::Arc;

use bitflags::bitflags;

use crate::{
    element::Tag,
    theme::{matcher::AttributeMatcher, style::StyleId},
};

bitflags! {
    /// Kinds of elements a rule applies to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ElementMask: u8 {
        const NODE = 0b01;
        const WAY = 0b10;
        const ANY = Self::NODE.bits() | Self::WAY.bits();
    }
}

bitflags! {
    /// Whether a rule applies to open ways, closed ways or both.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClosedMask: u8 {
        const NO = 0b01;
        const YES = 0b10;
        const ANY = Self::NO.bits() | Self::YES.bits();
    }
}

/// Highest zoom level with its own bit, larger levels share it.
pub const MAX_ZOOM_BIT: u8 = 31;

/// Bit `z` is set for every `min <= z <= max`.
pub fn zoom_mask(min: u8, max: u8) -> u32 {
    let min = min.min(MAX_ZOOM_BIT);
    let max = max.min(MAX_ZOOM_BIT);
    (min..=max).fold(0, |mask, z| mask | 1 << z)
}

/// The bit of a single zoom level.
pub fn zoom_bit(zoom: u8) -> u32 {
    1 << zoom.min(MAX_ZOOM_BIT)
}

#[derive(Debug, Clone)]
pub enum RuleMatcher {
    /// Passes if the key matcher and the value matcher each accept the tag set.
    Positive {
        key: Arc<AttributeMatcher>,
        value: Arc<AttributeMatcher>,
    },
    Negative(Arc<AttributeMatcher>),
}

impl RuleMatcher {
    fn matches(&self, tags: &[Tag]) -> bool {
        match self {
            RuleMatcher::Positive { key, value } => key.matches(tags) && value.matches(tags),
            RuleMatcher::Negative(matcher) => matcher.matches(tags),
        }
    }
}

/// Describes the element a match is done for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchQuery {
    pub element: ElementMask,
    pub closed: ClosedMask,
    pub zoom: u32,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) element: ElementMask,
    pub(crate) closed: ClosedMask,
    pub(crate) zoom: u32,
    pub(crate) matcher: RuleMatcher,
    pub(crate) styles: Vec<StyleId>,
    pub(crate) children: Vec<Rule>,
    /// Only the first matching child contributes, and the rule's own styles are dropped if
    /// none does.
    pub(crate) match_first: bool,
}

impl Rule {
    pub fn element(&self) -> ElementMask {
        self.element
    }

    pub fn closed(&self) -> ClosedMask {
        self.closed
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn matcher(&self) -> &RuleMatcher {
        &self.matcher
    }

    pub fn styles(&self) -> &[StyleId] {
        &self.styles
    }

    pub fn children(&self) -> &[Rule] {
        &self.children
    }

    pub fn match_first(&self) -> bool {
        self.match_first
    }

    fn accepts(&self, query: &MatchQuery, tags: &[Tag]) -> bool {
        self.element.intersects(query.element)
            && self.closed.intersects(query.closed)
            && self.zoom & query.zoom != 0
            && self.matcher.matches(tags)
    }

    /// Appends the styles of this rule and of all matching descendants and returns whether
    /// this rule matched. Children are only visited if this rule matched.
    pub fn match_element(
        &self,
        query: &MatchQuery,
        tags: &[Tag],
        out: &mut Vec<StyleId>,
    ) -> bool {
        if !self.accepts(query, tags) {
            return false;
        }

        let start = out.len();
        out.extend_from_slice(&self.styles);
        if !self.match_first {
            for child in &self.children {
                child.match_element(query, tags, out);
            }
            return true;
        }

        let selected = self
            .children
            .iter()
            .any(|child| child.match_element(query, tags, out));
        if !selected {
            out.truncate(start);
        }
        true
    }
}
