use std::fmt;

/// Routing table error
///
/// Returned by [`Router::find_route`](super::Router::find_route),
/// [`Router::lookup`](super::Router::lookup) and
/// [`Router::build_url`](super::Router::build_url).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No route is registered under the requested name
    NamedRouteNotFound {
        /// The requested route name
        name: String,
    },
    /// No registered route matches the path
    RouteNotFound {
        /// The path that was looked up
        path: String,
    },
    /// The arguments supplied to a URL build do not fit the route
    ///
    /// Either the argument count differs from the route's dynamic element count,
    /// or an argument key does not occur exactly once in the pattern.
    ArgumentMismatch {
        /// The route name
        name: String,
        /// The offending key; `None` when the argument count is wrong
        key: Option<String>,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::NamedRouteNotFound { name } => {
                write!(f, "named route '{}' not found", name)
            }
            RouterError::RouteNotFound { path } => {
                write!(f, "no route found for path '{}'", path)
            }
            RouterError::ArgumentMismatch { name, key: None } => {
                write!(
                    f,
                    "argument mismatch for route '{}': argument count differs from dynamic element count",
                    name
                )
            }
            RouterError::ArgumentMismatch {
                name,
                key: Some(key),
            } => {
                write!(
                    f,
                    "argument mismatch for route '{}': '{}' must occur exactly once in the pattern",
                    name, key
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}
