//! # Handler Registry
//!
//! A string-keyed, compile-time registry of handler types implementing
//! [`HandlerResolver`].
//!
//! Handler types are grouped into [`HandlerModule`]s, each registered under the
//! source location the dispatcher computes for it (`class_path + class + suffix`,
//! e.g. `"fooClass.rs"`). A module's types become resolvable only once the module
//! has been loaded, and loading a module again is a no-op.
//!
//! ```rust
//! use segrouter::registry::{HandlerModule, HandlerRegistry, HandlerType};
//! use serde_json::{json, Value};
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register_module(
//!     "greeterClass.rs",
//!     HandlerModule::new().with_type(
//!         HandlerType::new("greeterClass", |ctx: &Value| Greeter {
//!             greeting: ctx["greeting"].as_str().unwrap_or("hello").to_owned(),
//!         })
//!         .method("greet", |g, _args| json!(g.greeting)),
//!     ),
//! );
//! assert!(registry.contains_source("greeterClass.rs"));
//! ```

use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dispatcher::{
    DispatchError, Handler, HandlerFactory, HandlerResolver, LoadedModule, SourceRef,
};
use crate::route::ParamVec;

type Constructor<T> = dyn Fn(&Value) -> T + Send + Sync;
type Method<T> = dyn Fn(&mut T, &ParamVec) -> Value + Send + Sync;

/// A handler type built from a constructor and named methods
pub struct HandlerType<T> {
    name: String,
    constructor: Box<Constructor<T>>,
    methods: HashMap<String, Arc<Method<T>>>,
}

impl<T: 'static> HandlerType<T> {
    /// Create a handler type; `constructor` receives the dispatch context
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&Value) -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            constructor: Box::new(constructor),
            methods: HashMap::new(),
        }
    }

    /// Add a method. The method receives the whole argument bag.
    #[must_use]
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&mut T, &ParamVec) -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }
}

impl<T: 'static> HandlerFactory for HandlerType<T> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    fn construct(&self, context: &Value) -> Box<dyn Handler> {
        Box::new(Instance {
            state: (self.constructor)(context),
            methods: self.methods.clone(),
        })
    }
}

struct Instance<T> {
    state: T,
    methods: HashMap<String, Arc<Method<T>>>,
}

impl<T> Handler for Instance<T> {
    fn invoke(&mut self, method: &str, arguments: &ParamVec) -> Option<Value> {
        let method = self.methods.get(method)?;
        Some(method(&mut self.state, arguments))
    }
}

/// The handler types defined by one source
#[derive(Default)]
pub struct HandlerModule {
    types: Vec<Arc<dyn HandlerFactory>>,
}

impl HandlerModule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type<F: HandlerFactory + 'static>(mut self, factory: F) -> Self {
        self.types.push(Arc::new(factory));
        self
    }

    #[must_use]
    pub fn with_factory(mut self, factory: Arc<dyn HandlerFactory>) -> Self {
        self.types.push(factory);
        self
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.type_name())
    }
}

/// Registry of handler modules keyed by source location
#[derive(Default)]
pub struct HandlerRegistry {
    modules: HashMap<String, HandlerModule>,
    /// Types of every loaded module, keyed by type name
    loaded: DashMap<String, Arc<dyn HandlerFactory>>,
    /// Load requests per source location
    loads: DashMap<String, usize>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under `location`, replacing any module already there.
    ///
    /// Replacing a module unloads it: its types stop resolving and its load count
    /// starts over, so the replacement's types resolve once it is loaded.
    pub fn register_module(
        &mut self,
        location: impl Into<String>,
        module: HandlerModule,
    ) -> &mut Self {
        let location = location.into();
        info!(
            location = %location,
            handler_types = ?module.type_names().collect::<Vec<_>>(),
            "Handler module registered"
        );
        if let Some(previous) = self.modules.insert(location.clone(), module) {
            warn!(location = %location, "Replaced existing handler module");
            self.unload(&location, &previous);
        }
        self
    }

    fn unload(&self, location: &str, module: &HandlerModule) {
        if self.loads.remove(location).is_none() {
            return;
        }
        for factory in &module.types {
            self.loaded
                .remove_if(factory.type_name(), |_, loaded| Arc::ptr_eq(loaded, factory));
        }
        debug!(location = %location, "Handler module unloaded");
    }

    #[must_use]
    pub fn contains_source(&self, location: &str) -> bool {
        self.modules.contains_key(location)
    }

    /// How many times `location` has been loaded
    #[must_use]
    pub fn load_count(&self, location: &str) -> usize {
        self.loads.get(location).map(|c| *c).unwrap_or(0)
    }

    #[must_use]
    pub fn is_type_loaded(&self, type_name: &str) -> bool {
        self.loaded.contains_key(type_name)
    }
}

impl HandlerResolver for HandlerRegistry {
    fn locate(&self, location: &str) -> Option<SourceRef> {
        self.modules
            .contains_key(location)
            .then(|| SourceRef::new(location))
    }

    fn load(&self, source: &SourceRef) -> Result<LoadedModule, DispatchError> {
        let module = self
            .modules
            .get(source.location())
            .ok_or_else(|| DispatchError::Load {
                source: source.location().to_owned(),
                reason: "source is not registered".to_owned(),
            })?;

        let mut count = self.loads.entry(source.location().to_owned()).or_insert(0);
        *count += 1;
        if *count == 1 {
            for factory in &module.types {
                self.loaded
                    .insert(factory.type_name().to_owned(), Arc::clone(factory));
            }
            debug!(location = %source.location(), "Handler module loaded");
        } else {
            debug!(
                location = %source.location(),
                load_count = *count,
                "Handler module already loaded"
            );
        }
        Ok(LoadedModule::new(source.clone()))
    }

    fn resolve(&self, _module: &LoadedModule, type_name: &str) -> Option<Arc<dyn HandlerFactory>> {
        self.loaded.get(type_name).map(|f| Arc::clone(f.value()))
    }
}

/// Resolver that only locates sources present on disk.
///
/// The computed location is treated as a file path; when the file exists the
/// inner resolver is asked for the source under the file's name, so modules are
/// registered as e.g. `"fooClass.rs"` regardless of the class path.
#[derive(Debug, Clone)]
pub struct FsHandlerResolver<R> {
    inner: R,
}

impl<R: HandlerResolver> FsHandlerResolver<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: HandlerResolver> HandlerResolver for FsHandlerResolver<R> {
    fn locate(&self, location: &str) -> Option<SourceRef> {
        let path = Path::new(location);
        if !path.is_file() {
            debug!(location = %location, "Handler source file does not exist");
            return None;
        }
        let file_name = path.file_name()?.to_str()?;
        self.inner.locate(file_name)
    }

    fn load(&self, source: &SourceRef) -> Result<LoadedModule, DispatchError> {
        self.inner.load(source)
    }

    fn resolve(&self, module: &LoadedModule, type_name: &str) -> Option<Arc<dyn HandlerFactory>> {
        self.inner.resolve(module, type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::ParamVec;
    use serde_json::json;

    struct Counter {
        start: i64,
    }

    fn counter_module() -> HandlerModule {
        HandlerModule::new().with_type(
            HandlerType::new("counterClass", |ctx: &Value| Counter {
                start: ctx["start"].as_i64().unwrap_or(0),
            })
            .method("next", |c, _args| {
                c.start += 1;
                json!(c.start)
            }),
        )
    }

    #[test]
    fn test_types_resolve_only_after_load() {
        let mut registry = HandlerRegistry::new();
        registry.register_module("counterClass.rs", counter_module());

        let source = registry.locate("counterClass.rs").unwrap();
        assert!(!registry.is_type_loaded("counterClass"));

        let module = registry.load(&source).unwrap();
        assert!(registry.is_type_loaded("counterClass"));
        assert!(registry.resolve(&module, "counterClass").is_some());
        assert!(registry.resolve(&module, "otherClass").is_none());
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut registry = HandlerRegistry::new();
        registry.register_module("counterClass.rs", counter_module());

        let source = registry.locate("counterClass.rs").unwrap();
        registry.load(&source).unwrap();
        registry.load(&source).unwrap();
        assert_eq!(registry.load_count("counterClass.rs"), 2);
        assert_eq!(registry.load_count("missing.rs"), 0);
    }

    fn versioned_module(version: i64) -> HandlerModule {
        HandlerModule::new().with_type(
            HandlerType::new("fooClass", |_ctx: &Value| ())
                .method("version", move |_foo, _args| json!(version)),
        )
    }

    fn invoke_version(registry: &HandlerRegistry) -> Option<Value> {
        let module = registry
            .load(&registry.locate("fooClass.rs").unwrap())
            .unwrap();
        let factory = registry.resolve(&module, "fooClass")?;
        factory.construct(&Value::Null).invoke("version", &ParamVec::new())
    }

    #[test]
    fn test_replacing_loaded_module_resolves_new_types() {
        let mut registry = HandlerRegistry::new();
        registry.register_module("fooClass.rs", versioned_module(1));
        assert_eq!(invoke_version(&registry), Some(json!(1)));
        assert_eq!(registry.load_count("fooClass.rs"), 1);

        registry.register_module("fooClass.rs", versioned_module(2));
        assert!(!registry.is_type_loaded("fooClass"));
        assert_eq!(registry.load_count("fooClass.rs"), 0);

        assert_eq!(invoke_version(&registry), Some(json!(2)));
        assert_eq!(registry.load_count("fooClass.rs"), 1);
    }

    #[test]
    fn test_replacing_module_keeps_same_named_type_of_other_source() {
        let mut registry = HandlerRegistry::new();
        registry
            .register_module("a/fooClass.rs", versioned_module(1))
            .register_module("b/fooClass.rs", versioned_module(7));
        registry.load(&SourceRef::new("a/fooClass.rs")).unwrap();
        registry.load(&SourceRef::new("b/fooClass.rs")).unwrap();

        // b's factory won the type name; replacing a must not unload it
        registry.register_module("a/fooClass.rs", versioned_module(3));
        assert!(registry.is_type_loaded("fooClass"));
    }

    #[test]
    fn test_locate_unknown_source() {
        let registry = HandlerRegistry::new();
        assert!(registry.locate("nothing.rs").is_none());
        let err = registry.load(&SourceRef::new("nothing.rs")).unwrap_err();
        assert!(matches!(err, DispatchError::Load { .. }));
    }

    #[test]
    fn test_each_construct_is_a_fresh_instance() {
        let mut registry = HandlerRegistry::new();
        registry.register_module("counterClass.rs", counter_module());
        let module = registry
            .load(&registry.locate("counterClass.rs").unwrap())
            .unwrap();
        let factory = registry.resolve(&module, "counterClass").unwrap();

        let args = ParamVec::new();
        let ctx = json!({ "start": 10 });
        let mut first = factory.construct(&ctx);
        assert_eq!(first.invoke("next", &args), Some(json!(11)));
        assert_eq!(first.invoke("next", &args), Some(json!(12)));

        let mut second = factory.construct(&ctx);
        assert_eq!(second.invoke("next", &args), Some(json!(11)));
        assert_eq!(second.invoke("missing", &args), None);
        assert!(factory.has_method("next"));
        assert!(!factory.has_method("missing"));
    }

    #[test]
    fn test_fs_resolver_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = HandlerRegistry::new();
        registry.register_module("counterClass.rs", counter_module());
        let resolver = FsHandlerResolver::new(registry);

        let location = dir.path().join("counterClass.rs");
        let location = location.to_str().unwrap();
        assert!(resolver.locate(location).is_none());

        std::fs::write(location, "// counter handlers\n").unwrap();
        let source = resolver.locate(location).unwrap();
        assert_eq!(source.location(), "counterClass.rs");
    }
}
