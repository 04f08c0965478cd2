//! Echo handlers: every well-formed class and method resolves to a handler
//! that reports what it was called with. Used by the `dispatch` CLI command to
//! try a routing table out without any real handlers.

use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::dispatcher::{
    DispatchError, Handler, HandlerFactory, HandlerResolver, LoadedModule, SourceRef,
};
use crate::route::ParamVec;

/// Resolver that finds a source at every location and a type for every name
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResolver;

impl HandlerResolver for EchoResolver {
    fn locate(&self, location: &str) -> Option<SourceRef> {
        Some(SourceRef::new(location))
    }

    fn load(&self, source: &SourceRef) -> Result<LoadedModule, DispatchError> {
        Ok(LoadedModule::new(source.clone()))
    }

    fn resolve(&self, _module: &LoadedModule, type_name: &str) -> Option<Arc<dyn HandlerFactory>> {
        Some(Arc::new(EchoFactory {
            type_name: type_name.to_owned(),
        }))
    }
}

struct EchoFactory {
    type_name: String,
}

impl HandlerFactory for EchoFactory {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn has_method(&self, _method: &str) -> bool {
        true
    }

    fn construct(&self, context: &Value) -> Box<dyn Handler> {
        Box::new(EchoHandler {
            type_name: self.type_name.clone(),
            context: context.clone(),
        })
    }
}

struct EchoHandler {
    type_name: String,
    context: Value,
}

impl Handler for EchoHandler {
    fn invoke(&mut self, method: &str, arguments: &ParamVec) -> Option<Value> {
        let arguments: Map<String, Value> = arguments
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect();
        Some(json!({
            "class": self.type_name,
            "method": method,
            "arguments": arguments,
            "context": self.context,
        }))
    }
}
