//! # Route Module
//!
//! Route definitions and the segment matcher that backs them.
//!
//! ## Pattern syntax
//!
//! A pattern is a `/`-separated list of segments. A segment is *dynamic* when
//! it is registered on the route as a dynamic element; by convention those
//! names start with the dynamic marker `:`. Each dynamic element carries a rule:
//!
//! - a rule equal to the element name (`":id" => ":id"`) accepts any value
//! - any other rule is a regular expression body (`":id" => r"^\d{4}$"`),
//!   searched in the segment without implicit anchoring
//!
//! Rules are compiled with the `regex` crate, whose classes are Unicode-aware
//! unless told otherwise: `\d` accepts any decimal digit (Arabic-Indic `"١٢٣٤"`
//! matches `^\d{4}$`), and `\w` and `\s` widen the same way. This differs
//! from PCRE without the `u` flag. Use `[0-9]` or an ASCII group such as
//! `(?-u:\d)` for ASCII-only rules.
//!
//! The reserved placeholders [`CLASS_PLACEHOLDER`] and [`METHOD_PLACEHOLDER`]
//! bind the handler identity instead of an argument, but only when the route
//! has no configured class or method.
//!
//! ## Matching
//!
//! [`match_pattern`] is a pure function returning [`MatchBindings`].
//! [`Route::match_path`] wraps it without side effects and [`Route::match_map`]
//! commits the bindings into the route on success. A failed attempt never
//! touches previously committed state.

mod core;
mod element;
pub mod matcher;

pub use core::{ParamVec, Route, MAX_INLINE_PARAMS};
pub use element::{
    DynamicElement, ElementRule, CLASS_PLACEHOLDER, DYNAMIC_MARKER, METHOD_PLACEHOLDER,
};
pub use matcher::{match_pattern, strip_query, FixedIdentity, MatchBindings};
