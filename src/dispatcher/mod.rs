//! # Dispatcher Module
//!
//! The dispatcher turns a matched route into a handler invocation.
//!
//! ## Overview
//!
//! A route names its handler by class and method, either configured or bound
//! from the request path through the `:class` / `:method` placeholders. Because
//! that name can be untrusted input, the dispatcher validates it before it is
//! used for anything else, then asks a [`HandlerResolver`] for the code:
//!
//! 1. class and method are trimmed and must be non-empty
//! 2. namespace separators are stripped and the class must match `^[a-zA-Z0-9_]+$`
//! 3. the source location `class_path + class + suffix` must exist
//! 4. the source is loaded (idempotent)
//! 5. the type `class + suffix` (without `.rs`) must be defined
//! 6. the type must expose the method
//! 7. an instance is constructed with the dispatch context
//! 8. the method is invoked with the route's argument bag
//!
//! Every stage fails fast with its own [`DispatchError`] variant.
//!
//! ## Resolvers
//!
//! [`HandlerResolver`] is the seam to whatever holds the handler code. The
//! crate ships [`HandlerRegistry`](crate::registry::HandlerRegistry), a
//! string-keyed registry of handler factories,
//! [`FsHandlerResolver`](crate::registry::FsHandlerResolver), which additionally
//! requires the source file to exist on disk, and
//! [`EchoResolver`](crate::echo::EchoResolver) for trying routes out.
//!
//! ## Example
//!
//! ```rust
//! use segrouter::dispatcher::Dispatcher;
//! use segrouter::registry::{HandlerModule, HandlerRegistry, HandlerType};
//! use segrouter::route::Route;
//! use serde_json::{json, Value};
//!
//! struct Orders;
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register_module(
//!     "ordersController.rs",
//!     HandlerModule::new().with_type(
//!         HandlerType::new("ordersController", |_ctx: &Value| Orders)
//!             .method("show", |_orders, args| json!({ "id": args[0].1 })),
//!     ),
//! );
//!
//! let mut dispatcher = Dispatcher::new(registry);
//! dispatcher.set_suffix("Controller");
//!
//! let mut route = Route::new("/:class/:method/:id")
//!     .with_element(":class", ":class")
//!     .with_element(":method", ":method")
//!     .with_element(":id", ":id");
//! assert!(route.match_map("/orders/show/7"));
//!
//! let result = dispatcher.dispatch(&route, &Value::Null).unwrap();
//! assert_eq!(result, json!({ "id": "7" }));
//! ```

mod core;
mod error;
mod resolver;

pub use core::{
    sanitize_class_name, DispatchTarget, Dispatchable, Dispatcher, NAMESPACE_SEPARATORS,
    SOURCE_EXTENSION,
};
pub use error::DispatchError;
pub use resolver::{Handler, HandlerFactory, HandlerResolver, LoadedModule, SourceRef};
