//! Router core module - hot path for route lookup.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::error::RouterError;
use crate::route::{MatchBindings, ParamVec, Route};

/// Result of a read-only lookup: the matched route and what it bound
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// Name the route was registered under
    pub name: &'a str,
    /// The matched route, unchanged by the lookup
    pub route: &'a Route,
    /// Class, method and arguments bound by this match
    pub bindings: MatchBindings,
}

impl RouteMatch<'_> {
    /// The configured class, else the one bound by this match
    #[must_use]
    pub fn map_class(&self) -> Option<&str> {
        self.route
            .class
            .as_deref()
            .or(self.bindings.class.as_deref())
    }

    /// The configured method, else the one bound by this match
    #[must_use]
    pub fn map_method(&self) -> Option<&str> {
        self.route
            .method
            .as_deref()
            .or(self.bindings.method.as_deref())
    }

    #[must_use]
    pub fn map_arguments(&self) -> &ParamVec {
        &self.bindings.arguments
    }

    /// Get a bound argument by placeholder name (last write wins)
    #[inline]
    #[must_use]
    pub fn get_argument(&self, name: &str) -> Option<&str> {
        self.bindings
            .arguments
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert the bound arguments to a HashMap
    /// Note: This allocates - use get_argument() in hot paths instead
    #[must_use]
    pub fn arguments_map(&self) -> HashMap<String, String> {
        self.bindings
            .arguments
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Ordered, name-keyed routing table
///
/// Routes are scanned in registration order; the first match wins. Re-registering
/// a name replaces the route but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<(String, Route)>,
}

impl Router {
    /// Create an empty routing table
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register `route` under `name`, replacing any route already registered
    /// under that name.
    pub fn add_route(&mut self, name: impl Into<String>, route: Route) -> &mut Self {
        let name = name.into();
        match self.routes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => {
                warn!(route_name = %name, pattern = %route.path(), "Replaced existing route");
                slot.1 = route;
            }
            None => {
                info!(
                    route_name = %name,
                    pattern = %route.path(),
                    total_routes = self.routes.len() + 1,
                    "Route registered"
                );
                self.routes.push((name, route));
            }
        }
        self
    }

    /// Registered routes in lookup order
    pub fn routes(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(n, r)| (n.as_str(), r))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route matching `path` and commit its bindings.
    ///
    /// # Errors
    ///
    /// [`RouterError::RouteNotFound`] when no route matches.
    pub fn find_route(&mut self, path: &str) -> Result<&Route, RouterError> {
        let matched = self
            .routes
            .iter_mut()
            .position(|(_, route)| route.match_map(path));
        match matched {
            Some(index) => {
                let (name, route) = &self.routes[index];
                debug!(route_name = %name, path = %path, "Route found");
                Ok(route)
            }
            None => {
                debug!(path = %path, routes_count = self.routes.len(), "No route found");
                Err(RouterError::RouteNotFound {
                    path: path.to_owned(),
                })
            }
        }
    }

    /// Find the first route matching `path` without modifying the table.
    ///
    /// # Errors
    ///
    /// [`RouterError::RouteNotFound`] when no route matches.
    pub fn lookup(&self, path: &str) -> Result<RouteMatch<'_>, RouterError> {
        self.routes
            .iter()
            .find_map(|(name, route)| {
                route.match_path(path).map(|bindings| RouteMatch {
                    name: name.as_str(),
                    route,
                    bindings,
                })
            })
            .ok_or_else(|| RouterError::RouteNotFound {
                path: path.to_owned(),
            })
    }

    /// Build a URL from the route registered under `name`.
    ///
    /// Each argument key is replaced by its value in the raw pattern text, in the
    /// order given. The substitution is textual: every key must occur exactly once
    /// in the pattern at the moment it is replaced, and the number of arguments
    /// must equal the route's dynamic element count.
    ///
    /// # Errors
    ///
    /// - [`RouterError::NamedRouteNotFound`] when `name` is not registered
    /// - [`RouterError::ArgumentMismatch`] when the arguments do not fit
    pub fn build_url<I, K, V>(&self, name: &str, args: I) -> Result<String, RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let route = self
            .get(name)
            .ok_or_else(|| RouterError::NamedRouteNotFound {
                name: name.to_owned(),
            })?;

        let args: Vec<(K, V)> = args.into_iter().collect();
        if args.len() != route.dynamic_elements().len() {
            debug!(
                route_name = %name,
                supplied = args.len(),
                expected = route.dynamic_elements().len(),
                "URL build argument count mismatch"
            );
            return Err(RouterError::ArgumentMismatch {
                name: name.to_owned(),
                key: None,
            });
        }

        let mut url = route.path().to_owned();
        for (key, value) in &args {
            let key = key.as_ref();
            if key.is_empty() || url.matches(key).count() != 1 {
                return Err(RouterError::ArgumentMismatch {
                    name: name.to_owned(),
                    key: Some(key.to_owned()),
                });
            }
            url = url.replacen(key, value.as_ref(), 1);
        }
        Ok(url)
    }
}
