use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::route::Route;
use crate::router::Router;
use crate::runtime_config::DispatcherConfig;

/// One `[[routes]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Dynamic element name to rule; a rule equal to its name accepts anything
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub elements: BTreeMap<String, String>,
}

impl RouteConfig {
    #[must_use]
    pub fn to_route(&self) -> Route {
        let mut route = Route::new(self.path.as_str());
        if let Some(class) = &self.class {
            route = route.with_class(class.as_str());
        }
        if let Some(method) = &self.method {
            route = route.with_method(method.as_str());
        }
        for (name, rule) in &self.elements {
            route = route.with_element(name.as_str(), rule.as_str());
        }
        route
    }
}

/// A parsed route file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatcher: Option<DispatcherConfig>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl RouteFile {
    /// Parse a route file from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Build a router holding every route in file order.
    ///
    /// A repeated name replaces the earlier route in place (the router warns).
    #[must_use]
    pub fn build_router(&self) -> Router {
        let mut router = Router::new();
        for entry in &self.routes {
            router.add_route(entry.name.as_str(), entry.to_route());
        }
        router
    }

    /// Dispatcher settings from the file layered over `base`
    #[must_use]
    pub fn dispatcher_config(&self, base: DispatcherConfig) -> DispatcherConfig {
        match &self.dispatcher {
            Some(file) => base.overridden_by(file.clone()),
            None => base,
        }
    }
}
