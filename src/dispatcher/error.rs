use std::fmt;

/// Dispatch error
///
/// Each variant is one failed stage of [`Dispatcher::dispatch`](super::Dispatcher::dispatch).
/// Stages run in a fixed order, so the variant also tells how far dispatch got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The route carries no class name (or only whitespace)
    ClassNotSpecified,
    /// The route carries no method name (or only whitespace)
    MethodNotSpecified,
    /// The class name contains characters outside `[a-zA-Z0-9_]`
    ///
    /// The class may come straight from the request path, so it is rejected
    /// before it is used to build a source location.
    InvalidClassName {
        /// The class name after namespace separators were stripped
        class: String,
    },
    /// The resolver has no handler source at the computed location
    HandlerSourceNotFound {
        /// Class path + class name + suffix
        source: String,
    },
    /// The resolver failed to load a source it had located
    Load {
        /// The located source
        source: String,
        /// Resolver-specific reason
        reason: String,
    },
    /// The loaded source does not define the handler type
    HandlerTypeNotFound {
        /// Class name + suffix without the source extension
        type_name: String,
    },
    /// The handler type does not expose the method
    HandlerMethodNotFound {
        /// The handler type
        type_name: String,
        /// The requested method
        method: String,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::ClassNotSpecified => write!(f, "class name not specified"),
            DispatchError::MethodNotSpecified => write!(f, "method name not specified"),
            DispatchError::InvalidClassName { class } => {
                write!(f, "disallowed characters in class name '{}'", class)
            }
            DispatchError::HandlerSourceNotFound { source } => {
                write!(f, "handler source not found at '{}'", source)
            }
            DispatchError::Load { source, reason } => {
                write!(f, "failed to load handler source '{}': {}", source, reason)
            }
            DispatchError::HandlerTypeNotFound { type_name } => {
                write!(f, "handler type '{}' not found", type_name)
            }
            DispatchError::HandlerMethodNotFound { type_name, method } => {
                write!(
                    f,
                    "method '{}' not found on handler type '{}'",
                    method, type_name
                )
            }
        }
    }
}

impl std::error::Error for DispatchError {}
