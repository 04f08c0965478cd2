//! Dispatcher core module.
//!
//! The pipeline in [`Dispatcher::dispatch`] is strictly ordered: each stage
//! assumes the guarantee of the one before it. In particular, the class name is
//! whitelisted before it is used to compute a source location.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::DispatchError;
use super::resolver::HandlerResolver;
use crate::ids::DispatchId;
use crate::route::{ParamVec, Route};
use crate::router::RouteMatch;
use crate::runtime_config::DispatcherConfig;

/// Extension every handler source location ends with
pub const SOURCE_EXTENSION: &str = ".rs";

/// Characters removed from a class name before the whitelist check
pub const NAMESPACE_SEPARATORS: [char; 2] = ['\\', ':'];

static CLASS_NAME_WHITELIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("class name whitelist regex should be valid"));

/// Anything that carries a resolved class, method and argument bag
pub trait Dispatchable {
    fn map_class(&self) -> Option<&str>;
    fn map_method(&self) -> Option<&str>;
    fn map_arguments(&self) -> &ParamVec;
}

impl Dispatchable for Route {
    fn map_class(&self) -> Option<&str> {
        Route::map_class(self)
    }

    fn map_method(&self) -> Option<&str> {
        Route::map_method(self)
    }

    fn map_arguments(&self) -> &ParamVec {
        Route::map_arguments(self)
    }
}

impl Dispatchable for RouteMatch<'_> {
    fn map_class(&self) -> Option<&str> {
        RouteMatch::map_class(self)
    }

    fn map_method(&self) -> Option<&str> {
        RouteMatch::map_method(self)
    }

    fn map_arguments(&self) -> &ParamVec {
        RouteMatch::map_arguments(self)
    }
}

/// Handler identity and arguments read from a matched route at dispatch time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    /// Sanitised class name, guaranteed to match `^[a-zA-Z0-9_]+$`
    pub class_name: String,
    /// Trimmed, non-empty method name
    pub method_name: String,
    pub arguments: ParamVec,
}

impl DispatchTarget {
    /// Read and validate the handler identity of `route`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::ClassNotSpecified`], [`DispatchError::MethodNotSpecified`]
    /// or [`DispatchError::InvalidClassName`], checked in that order.
    pub fn from_route<T: Dispatchable + ?Sized>(route: &T) -> Result<Self, DispatchError> {
        let class = route.map_class().unwrap_or_default().trim();
        let method = route.map_method().unwrap_or_default().trim();

        if class.is_empty() {
            return Err(DispatchError::ClassNotSpecified);
        }
        if method.is_empty() {
            return Err(DispatchError::MethodNotSpecified);
        }

        Ok(Self {
            class_name: sanitize_class_name(class)?,
            method_name: method.to_owned(),
            arguments: route.map_arguments().clone(),
        })
    }
}

/// Strip namespace separators and require the rest to be `[a-zA-Z0-9_]+`.
///
/// # Errors
///
/// [`DispatchError::InvalidClassName`] when anything else remains.
pub fn sanitize_class_name(class: &str) -> Result<String, DispatchError> {
    let stripped: String = class
        .chars()
        .filter(|c| !NAMESPACE_SEPARATORS.contains(c))
        .collect();
    if CLASS_NAME_WHITELIST.is_match(&stripped) {
        Ok(stripped)
    } else {
        Err(DispatchError::InvalidClassName { class: stripped })
    }
}

/// Resolves matched routes to handler instances and invokes them
///
/// The dispatcher keeps no state between calls besides its configuration: a
/// class path, a naming suffix and the [`HandlerResolver`] it consults.
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    resolver: R,
    suffix: String,
    class_path: String,
}

impl<R: HandlerResolver> Dispatcher<R> {
    /// Create a dispatcher with an empty suffix and no class path
    pub fn new(resolver: R) -> Self {
        let mut dispatcher = Self {
            resolver,
            suffix: String::new(),
            class_path: String::new(),
        };
        dispatcher.set_suffix("");
        dispatcher
    }

    /// Create a dispatcher from configuration; unset values keep their defaults
    pub fn from_config(resolver: R, config: &DispatcherConfig) -> Self {
        let mut dispatcher = Self::new(resolver);
        if let Some(suffix) = &config.suffix {
            dispatcher.set_suffix(suffix);
        }
        if let Some(class_path) = &config.class_path {
            dispatcher.set_class_path(class_path);
        }
        dispatcher
    }

    /// Set the naming suffix, e.g. `"Controller"`.
    ///
    /// The suffix is appended to the class name for both the source location
    /// (`fooController.rs`) and the type name (`fooController`).
    pub fn set_suffix(&mut self, suffix: &str) -> &mut Self {
        self.suffix = format!("{suffix}{SOURCE_EXTENSION}");
        self
    }

    /// Set the directory handler sources live in.
    ///
    /// One trailing `/` is stripped and exactly one appended.
    pub fn set_class_path(&mut self, path: &str) -> &mut Self {
        let trimmed = path.strip_suffix('/').unwrap_or(path);
        self.class_path = format!("{trimmed}/");
        self
    }

    /// The suffix including [`SOURCE_EXTENSION`]
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The class path, empty or ending in `/`
    #[must_use]
    pub fn class_path(&self) -> &str {
        &self.class_path
    }

    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Where the source of `class_name` is expected
    #[must_use]
    pub fn source_location(&self, class_name: &str) -> String {
        let mut location =
            String::with_capacity(self.class_path.len() + class_name.len() + self.suffix.len());
        location.push_str(&self.class_path);
        location.push_str(class_name);
        location.push_str(&self.suffix);
        location
    }

    /// The type name `class_name` resolves to: class name plus suffix without
    /// the source extension
    #[must_use]
    pub fn type_name(&self, class_name: &str) -> String {
        let mut type_name = String::with_capacity(class_name.len() + self.suffix.len());
        type_name.push_str(class_name);
        type_name.push_str(&self.suffix.replace(SOURCE_EXTENSION, ""));
        type_name
    }

    /// Dispatch a matched route.
    ///
    /// 1. trim class and method; both must be non-empty
    /// 2. whitelist the class name
    /// 3. locate the handler source
    /// 4. load it
    /// 5. resolve the handler type
    /// 6. check the method exists
    /// 7. construct an instance with `context`
    /// 8. invoke the method with the argument bag and return its result verbatim
    ///
    /// # Errors
    ///
    /// The [`DispatchError`] of the first stage that fails.
    pub fn dispatch<T: Dispatchable + ?Sized>(
        &self,
        route: &T,
        context: &Value,
    ) -> Result<Value, DispatchError> {
        let dispatch_id = DispatchId::new();
        let target = DispatchTarget::from_route(route).inspect_err(|e| {
            warn!(dispatch_id = %dispatch_id, error = %e, "Dispatch rejected route");
        })?;

        let location = self.source_location(&target.class_name);
        debug!(
            dispatch_id = %dispatch_id,
            class = %target.class_name,
            method = %target.method_name,
            location = %location,
            "Handler source lookup"
        );
        let source = self
            .resolver
            .locate(&location)
            .ok_or_else(|| DispatchError::HandlerSourceNotFound {
                source: location.clone(),
            })?;

        let module = self.resolver.load(&source)?;

        let type_name = self.type_name(&target.class_name);
        let factory = self.resolver.resolve(&module, &type_name).ok_or_else(|| {
            DispatchError::HandlerTypeNotFound {
                type_name: type_name.clone(),
            }
        })?;

        if !factory.has_method(&target.method_name) {
            return Err(DispatchError::HandlerMethodNotFound {
                type_name,
                method: target.method_name,
            });
        }

        info!(
            dispatch_id = %dispatch_id,
            handler_type = %type_name,
            method = %target.method_name,
            arguments = ?target.arguments,
            "Handler invocation start"
        );

        let mut handler = factory.construct(context);
        let result = handler
            .invoke(&target.method_name, &target.arguments)
            .ok_or_else(|| DispatchError::HandlerMethodNotFound {
                type_name: type_name.clone(),
                method: target.method_name.clone(),
            })?;

        debug!(dispatch_id = %dispatch_id, handler_type = %type_name, "Handler invocation complete");
        Ok(result)
    }
}
