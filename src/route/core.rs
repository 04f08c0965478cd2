use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::element::DynamicElement;
use super::matcher::{match_pattern, FixedIdentity, MatchBindings};

/// Maximum number of extracted arguments before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated argument storage for the match path.
///
/// Argument names are the placeholder names from the pattern (`":id"`), stored as
/// `Arc<str>` so copying a bag is cheap; values are the raw path segments.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A route definition: a pattern, an optional configured handler identity, its
/// dynamic elements and the bindings of the last successful match.
#[derive(Debug, Clone, Default)]
pub struct Route {
    path: String,
    /// Configured class; wins over anything discovered from the path
    pub(crate) class: Option<String>,
    /// Configured method; wins over anything discovered from the path
    pub(crate) method: Option<String>,
    discovered_class: Option<String>,
    discovered_method: Option<String>,
    dynamic_elements: Vec<DynamicElement>,
    map_arguments: ParamVec,
}

impl Route {
    /// Create a route for the given pattern, e.g. `"/:class/:method/:id"`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Replace the pattern
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Configure the handler class. A `:class` placeholder then binds nothing.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Configure the handler method. A `:method` placeholder then binds nothing.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Register a dynamic element.
    ///
    /// `rule` equal to `name` accepts any segment; any other rule is a regular
    /// expression. Registering an existing name replaces its rule.
    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>, rule: impl Into<String>) -> Self {
        let element = DynamicElement::new(name, rule);
        match self
            .dynamic_elements
            .iter_mut()
            .find(|e| e.name() == element.name())
        {
            Some(slot) => *slot = element,
            None => self.dynamic_elements.push(element),
        }
        self
    }

    /// The raw pattern string
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The handler class: the configured one, else the one discovered by the
    /// last successful match
    #[must_use]
    pub fn map_class(&self) -> Option<&str> {
        self.class.as_deref().or(self.discovered_class.as_deref())
    }

    /// The handler method: the configured one, else the one discovered by the
    /// last successful match
    #[must_use]
    pub fn map_method(&self) -> Option<&str> {
        self.method.as_deref().or(self.discovered_method.as_deref())
    }

    #[must_use]
    pub fn dynamic_elements(&self) -> &[DynamicElement] {
        &self.dynamic_elements
    }

    #[must_use]
    pub fn dynamic_element(&self, name: &str) -> Option<&DynamicElement> {
        self.dynamic_elements.iter().find(|e| e.name() == name)
    }

    /// Arguments bound by the last successful match
    #[must_use]
    pub fn map_arguments(&self) -> &ParamVec {
        &self.map_arguments
    }

    /// Get a bound argument by placeholder name (last write wins)
    #[inline]
    #[must_use]
    pub fn get_argument(&self, name: &str) -> Option<&str> {
        self.map_arguments
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert the bound arguments to a HashMap
    /// Note: This allocates - use get_argument() in hot paths instead
    #[must_use]
    pub fn arguments_map(&self) -> HashMap<String, String> {
        self.map_arguments
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    pub(crate) fn fixed_identity(&self) -> FixedIdentity {
        FixedIdentity {
            class: self.class.is_some(),
            method: self.method.is_some(),
        }
    }

    /// Match `candidate` without touching this route.
    #[must_use]
    pub fn match_path(&self, candidate: &str) -> Option<MatchBindings> {
        match_pattern(
            &self.path,
            &self.dynamic_elements,
            self.fixed_identity(),
            candidate,
        )
    }

    /// Match `candidate` and, on success, commit the discovered class, method and
    /// arguments into this route. Returns whether the route matched.
    ///
    /// A failed match leaves the previously committed state as it was.
    pub fn match_map(&mut self, candidate: &str) -> bool {
        match self.match_path(candidate) {
            Some(bindings) => {
                debug!(
                    pattern = %self.path,
                    path = %candidate,
                    class = ?bindings.class,
                    method = ?bindings.method,
                    arguments = ?bindings.arguments,
                    "Route matched"
                );
                self.commit(bindings);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, bindings: MatchBindings) {
        self.discovered_class = bindings.class;
        self.discovered_method = bindings.method;
        self.map_arguments = bindings.arguments;
    }
}
