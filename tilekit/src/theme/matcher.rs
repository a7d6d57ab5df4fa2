//! Attribute matchers test the tags of an element.

use crate::element::Tag;

/// Marks a value list of a negative rule: elements pass unless a listed value is present.
pub const STRING_NEGATION: &str = "~";
/// Marks a value list of an exclusive rule: elements pass only if no listed value is present.
pub const STRING_EXCLUSIVE: &str = "-";
pub const STRING_WILDCARD: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeMatcher {
    Any,
    SingleKey(String),
    MultiKey(Vec<String>),
    SingleValue(String),
    MultiValue(Vec<String>),
    /// Passes if no tag has one of `keys`. Otherwise the result depends on whether a tag
    /// carries one of `values`: such a tag fails an exclusive matcher and passes a negating
    /// one.
    Negative {
        keys: Vec<String>,
        values: Vec<String>,
        exclusive: bool,
    },
}

impl AttributeMatcher {
    pub fn matches(&self, tags: &[Tag]) -> bool {
        match self {
            AttributeMatcher::Any => true,
            AttributeMatcher::SingleKey(key) => tags.iter().any(|tag| tag.key == key.as_str()),
            AttributeMatcher::MultiKey(keys) => tags
                .iter()
                .any(|tag| keys.iter().any(|key| tag.key == key.as_str())),
            AttributeMatcher::SingleValue(value) => {
                tags.iter().any(|tag| tag.value == value.as_str())
            }
            AttributeMatcher::MultiValue(values) => tags
                .iter()
                .any(|tag| values.iter().any(|value| tag.value == value.as_str())),
            AttributeMatcher::Negative {
                keys,
                values,
                exclusive,
            } => {
                let has_key = tags
                    .iter()
                    .any(|tag| keys.iter().any(|key| tag.key == key.as_str()));
                if !has_key {
                    return true;
                }

                let has_value = tags
                    .iter()
                    .any(|tag| values.iter().any(|value| tag.value == value.as_str()));
                if has_value {
                    !exclusive
                } else {
                    *exclusive
                }
            }
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, AttributeMatcher::Any)
    }

    /// Key or value strings this matcher accepts. Empty for `Any` and negative matchers.
    fn accepted(&self) -> &[String] {
        match self {
            AttributeMatcher::SingleKey(s) | AttributeMatcher::SingleValue(s) => {
                std::slice::from_ref(s)
            }
            AttributeMatcher::MultiKey(list) | AttributeMatcher::MultiValue(list) => list,
            AttributeMatcher::Any | AttributeMatcher::Negative { .. } => &[],
        }
    }

    fn is_key_matcher(&self) -> bool {
        matches!(
            self,
            AttributeMatcher::SingleKey(_) | AttributeMatcher::MultiKey(_)
        )
    }

    /// Whether every tag set accepted by `ancestor` is also accepted by `self`, so `self` can
    /// be dropped below a matching `ancestor`.
    pub fn is_implied_by(&self, ancestor: &AttributeMatcher) -> bool {
        if self.is_any() {
            return true;
        }
        if self.is_key_matcher() != ancestor.is_key_matcher() {
            return false;
        }

        let required = ancestor.accepted();
        let accepted = self.accepted();
        !required.is_empty()
            && !accepted.is_empty()
            && required.iter().all(|item| accepted.contains(item))
    }
}

#[cfg(test)]
mod tests {
    use crate::{element::Tag, theme::matcher::AttributeMatcher};

    fn tags(list: &[(&'static str, &'static str)]) -> Vec<Tag> {
        list.iter().map(|(k, v)| Tag::fixed(k, v)).collect()
    }

    #[test]
    fn test_key_value() {
        let highway = tags(&[("highway", "primary"), ("name", "Ring")]);

        assert!(AttributeMatcher::SingleKey("highway".into()).matches(&highway));
        assert!(!AttributeMatcher::SingleKey("railway".into()).matches(&highway));
        assert!(AttributeMatcher::MultiKey(vec!["railway".into(), "highway".into()])
            .matches(&highway));
        assert!(AttributeMatcher::SingleValue("primary".into()).matches(&highway));
        assert!(
            !AttributeMatcher::MultiValue(vec!["secondary".into(), "tertiary".into()])
                .matches(&highway)
        );
        assert!(AttributeMatcher::Any.matches(&[]));
    }

    #[test]
    fn test_negative_and_exclusive() {
        let negation = AttributeMatcher::Negative {
            keys: vec!["tunnel".into()],
            values: vec!["no".into()],
            exclusive: false,
        };
        let exclusive = AttributeMatcher::Negative {
            keys: vec!["tunnel".into()],
            values: vec!["yes".into()],
            exclusive: true,
        };

        let plain = tags(&[("highway", "primary")]);
        assert!(negation.matches(&plain));
        assert!(exclusive.matches(&plain));

        let tunnel = tags(&[("highway", "primary"), ("tunnel", "yes")]);
        assert!(!negation.matches(&tunnel));
        assert!(!exclusive.matches(&tunnel));

        let no_tunnel = tags(&[("highway", "primary"), ("tunnel", "no")]);
        assert!(negation.matches(&no_tunnel));
        assert!(exclusive.matches(&no_tunnel));
    }

    #[test]
    fn test_implied_by() {
        let highway = AttributeMatcher::SingleKey("highway".into());
        let roads = AttributeMatcher::MultiKey(vec!["highway".into(), "railway".into()]);
        let primary = AttributeMatcher::SingleValue("highway".into());

        assert!(highway.is_implied_by(&highway));
        assert!(roads.is_implied_by(&highway));
        assert!(!highway.is_implied_by(&roads));
        assert!(!primary.is_implied_by(&highway));
        assert!(!highway.is_implied_by(&AttributeMatcher::Any));
    }
}
