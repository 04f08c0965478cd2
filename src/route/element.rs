use regex::Regex;
use tracing::warn;

/// Leading character of a placeholder segment.
///
/// Only patterns may carry it; a candidate segment starting with it never matches.
pub const DYNAMIC_MARKER: char = ':';

/// Placeholder whose bound value becomes the handler class.
pub const CLASS_PLACEHOLDER: &str = ":class";

/// Placeholder whose bound value becomes the handler method.
pub const METHOD_PLACEHOLDER: &str = ":method";

/// Compiled matching rule of a dynamic element
#[derive(Debug, Clone)]
pub enum ElementRule {
    /// The rule text equals the element name: any value is accepted
    Any,
    /// Regular expression searched in the candidate segment
    Pattern(Regex),
    /// The rule text did not compile; the element never matches
    Invalid(String),
}

/// A named placeholder together with its matching rule
#[derive(Debug, Clone)]
pub struct DynamicElement {
    name: String,
    rule_source: String,
    rule: ElementRule,
}

impl DynamicElement {
    /// Build an element from its name and rule text.
    ///
    /// A rule identical to `name` accepts anything. Otherwise the rule is compiled
    /// as a regular expression; a rule that fails to compile is kept as
    /// [`ElementRule::Invalid`] and logged.
    pub fn new(name: impl Into<String>, rule: impl Into<String>) -> Self {
        let name = name.into();
        let rule_source = rule.into();
        let rule = if rule_source == name {
            ElementRule::Any
        } else {
            match Regex::new(&rule_source) {
                Ok(re) => ElementRule::Pattern(re),
                Err(e) => {
                    warn!(
                        element = %name,
                        rule = %rule_source,
                        error = %e,
                        "Dynamic element rule is not a valid regular expression - element will never match"
                    );
                    ElementRule::Invalid(e.to_string())
                }
            }
        };
        Self {
            name,
            rule_source,
            rule,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule as it was written
    #[must_use]
    pub fn rule_source(&self) -> &str {
        &self.rule_source
    }

    #[must_use]
    pub fn rule(&self) -> &ElementRule {
        &self.rule
    }

    /// Whether `segment` satisfies this element's rule
    #[inline]
    #[must_use]
    pub fn accepts(&self, segment: &str) -> bool {
        match &self.rule {
            ElementRule::Any => true,
            ElementRule::Pattern(re) => re.is_match(segment),
            ElementRule::Invalid(_) => false,
        }
    }
}
