use serde_json::Value;
use std::sync::Arc;

use super::error::DispatchError;
use crate::route::ParamVec;

/// A handler source the resolver has located
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    location: String,
}

impl SourceRef {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// A handler source after it has been loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    source: SourceRef,
}

impl LoadedModule {
    #[must_use]
    pub fn new(source: SourceRef) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &SourceRef {
        &self.source
    }
}

/// One constructed handler instance
pub trait Handler {
    /// Call `method` with the route's arguments as a single bag.
    ///
    /// Returns `None` only when the instance has no such method.
    fn invoke(&mut self, method: &str, arguments: &ParamVec) -> Option<Value>;
}

/// A resolvable handler type: knows its methods and how to build instances
pub trait HandlerFactory: Send + Sync {
    fn type_name(&self) -> &str;

    fn has_method(&self, method: &str) -> bool;

    /// Build a fresh instance, handing it the dispatch context
    fn construct(&self, context: &Value) -> Box<dyn Handler>;
}

/// Pluggable source of handlers for the [`Dispatcher`](super::Dispatcher)
///
/// The dispatcher only ever calls these in order (`locate`, `load`, `resolve`)
/// and only with a class name that already passed the whitelist.
pub trait HandlerResolver {
    /// Map a source location to a handler source, if one exists there
    fn locate(&self, location: &str) -> Option<SourceRef>;

    /// Load a located source. Loading the same source again must succeed.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Load`] when the resolver cannot load the source.
    fn load(&self, source: &SourceRef) -> Result<LoadedModule, DispatchError>;

    /// Find a handler type among the loaded sources
    fn resolve(&self, module: &LoadedModule, type_name: &str) -> Option<Arc<dyn HandlerFactory>>;
}

impl<R: HandlerResolver + ?Sized> HandlerResolver for Arc<R> {
    fn locate(&self, location: &str) -> Option<SourceRef> {
        (**self).locate(location)
    }

    fn load(&self, source: &SourceRef) -> Result<LoadedModule, DispatchError> {
        (**self).load(source)
    }

    fn resolve(&self, module: &LoadedModule, type_name: &str) -> Option<Arc<dyn HandlerFactory>> {
        (**self).resolve(module, type_name)
    }
}
