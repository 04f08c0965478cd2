//! # Router Module
//!
//! The router owns an insertion-ordered, name-keyed table of [`Route`](crate::route::Route)s.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering routes under unique names (last registration wins)
//! - Finding the first route, in registration order, that matches a request path
//! - Building URLs back from a route name and argument values
//!
//! ## Precedence
//!
//! Lookup is a linear scan in the order routes were added. Register specific
//! routes before general ones; a catch-all such as `/:class/:method/:id` belongs
//! at the end of the table.
//!
//! ## Example
//!
//! ```rust
//! use segrouter::{Route, Router};
//!
//! let mut router = Router::new();
//! router
//!     .add_route(
//!         "phone_numbers",
//!         Route::new("/2008-08-01/Accounts/:id/IncomingPhoneNumbers")
//!             .with_class("IncomingPhoneNumbers")
//!             .with_method("list")
//!             .with_element(":id", ":id"),
//!     )
//!     .add_route("default", Route::new("/:class/:method").with_element(":class", ":class").with_element(":method", ":method"));
//!
//! let found = router
//!     .lookup("/2008-08-01/Accounts/1/IncomingPhoneNumbers?a=1&b=2")
//!     .unwrap();
//! assert_eq!(found.name, "phone_numbers");
//! assert_eq!(found.get_argument(":id"), Some("1"));
//! ```
//!
//! ## Concurrency
//!
//! [`Router::find_route`] commits bindings into the matched route and therefore
//! needs `&mut self`. Tables shared between threads should be built once and
//! queried with [`Router::lookup`], which returns the bindings alongside the route
//! and leaves the table untouched.

mod core;
mod error;

pub use core::{RouteMatch, Router};
pub use error::RouterError;
