//! # Route Files
//!
//! A routing table and dispatcher settings described in TOML:
//!
//! ```toml
//! [dispatcher]
//! class_path = "handlers"
//! suffix = "Controller"
//!
//! [[routes]]
//! name = "orders"
//! path = "/orders/show/:yearStart/:yearEnd"
//! class = "orders"
//! method = "show_range"
//! [routes.elements]
//! ":yearStart" = '^[1-9]{1}\d{3}$'
//! ":yearEnd" = '^[1-9]{1}\d{3}$'
//! ```
//!
//! Routes are registered in file order, so earlier entries win on overlap.

mod load;
mod types;

pub use load::load_routes;
pub use types::{RouteConfig, RouteFile};
