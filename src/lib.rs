//! # segrouter
//!
//! **segrouter** is a segment-matching path router with named reverse URLs and a
//! dispatcher that turns a matched route into a handler invocation.
//!
//! ## Overview
//!
//! A route is a `/`-separated pattern. Segments are either literal text or
//! placeholders (names starting with `:`) registered as *dynamic elements*. A
//! dynamic element either accepts any value or constrains the segment with a
//! regular expression. Two placeholders are reserved: `:class` and `:method`
//! supply the handler identity from the request path itself when the route
//! does not configure one.
//!
//! ## Architecture
//!
//! - **[`route`]** - Route definitions and the pure segment matcher
//! - **[`router`]** - Ordered, named routing table and reverse URL building
//! - **[`dispatcher`]** - Class/method validation and handler invocation through a
//!   pluggable [`dispatcher::HandlerResolver`]
//! - **[`registry`]** - Compile-time handler registry backing the resolver contract
//! - **[`config`]** - TOML route files
//! - **[`hot_reload`]** - Live reloading of route files
//! - **[`logging`]** - `tracing-subscriber` initialisation
//! - **[`cli`]** - The `segrouter` command line front end
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router
//!     participant Route
//!     participant Dispatcher
//!     participant Resolver as HandlerResolver
//!
//!     Caller->>Router: find_route("/orders/show/2008/2009")
//!     loop insertion order
//!         Router->>Route: match_map(path)
//!     end
//!     Router-->>Caller: &Route
//!     Caller->>Dispatcher: dispatch(route, context)
//!     Dispatcher->>Dispatcher: trim + whitelist class name
//!     Dispatcher->>Resolver: locate / load / resolve
//!     Resolver-->>Dispatcher: HandlerFactory
//!     Dispatcher->>Resolver: construct(context).invoke(method, args)
//!     Dispatcher-->>Caller: serde_json::Value
//! ```
//!
//! ## Example
//!
//! ```rust
//! use segrouter::router::Router;
//! use segrouter::route::Route;
//!
//! let mut router = Router::new();
//! router.add_route(
//!     "default",
//!     Route::new("/:class/:method/:id")
//!         .with_element(":class", ":class")
//!         .with_element(":method", ":method")
//!         .with_element(":id", r"^\d+$"),
//! );
//!
//! let route = router.find_route("/orders/show/42?page=2").unwrap();
//! assert_eq!(route.map_class(), Some("orders"));
//! assert_eq!(route.map_method(), Some("show"));
//! assert_eq!(route.get_argument(":id"), Some("42"));
//!
//! let url = router
//!     .build_url("default", [(":class", "orders"), (":method", "show"), (":id", "7")])
//!     .unwrap();
//! assert_eq!(url, "/orders/show/7");
//! ```

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod echo;
pub mod hot_reload;
pub mod ids;
pub mod logging;
pub mod registry;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use dispatcher::{DispatchError, Dispatcher, HandlerResolver};
pub use route::{ParamVec, Route};
pub use router::{RouteMatch, Router, RouterError};
