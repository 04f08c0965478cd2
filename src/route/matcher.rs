//! Segment matcher - hot path for route lookup.
//!
//! Everything here is pure: the matcher never touches a [`Route`](super::Route),
//! it only reports what a successful match would bind.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use smallvec::SmallVec;
use std::sync::Arc;
use tracing::trace;

use super::core::ParamVec;
use super::element::{DynamicElement, CLASS_PLACEHOLDER, DYNAMIC_MARKER, METHOD_PLACEHOLDER};

/// Segment lists up to this depth stay on the stack.
const INLINE_SEGMENTS: usize = 16;

/// Which parts of the handler identity are already configured on the route.
///
/// A configured part is never overwritten by a `:class` / `:method` binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedIdentity {
    pub class: bool,
    pub method: bool,
}

/// Values bound by one successful match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchBindings {
    /// Class discovered from the `:class` placeholder
    pub class: Option<String>,
    /// Method discovered from the `:method` placeholder
    pub method: Option<String>,
    /// Every other placeholder, in pattern order
    pub arguments: ParamVec,
}

/// Strip the query string and fragment from a request path.
///
/// ```rust
/// use segrouter::route::strip_query;
///
/// assert_eq!(strip_query("/a/b?x=1#top"), "/a/b");
/// assert_eq!(strip_query("/a/b"), "/a/b");
/// ```
#[inline]
#[must_use]
pub fn strip_query(path: &str) -> &str {
    match path.find(|c| c == '?' || c == '#') {
        Some(end) => &path[..end],
        None => path,
    }
}

/// Match `candidate` against `pattern`.
///
/// Returns `None` as soon as any rule fails:
///
/// 1. query string and fragment are ignored
/// 2. one leading `/` is dropped from both sides before splitting on `/`
/// 3. segment counts must be equal
/// 4. a candidate segment starting with `:` fails the match
/// 5. each pattern segment must equal the candidate segment or name a dynamic
///    element whose rule accepts it
/// 6. the accepted segments, re-joined with a leading `/` each, must reproduce
///    the candidate exactly
pub fn match_pattern(
    pattern: &str,
    elements: &[DynamicElement],
    fixed: FixedIdentity,
    candidate: &str,
) -> Option<MatchBindings> {
    let path = strip_query(candidate);

    let pattern_body = pattern.strip_prefix('/').unwrap_or(pattern);
    let path_body = path.strip_prefix('/').unwrap_or(path);

    let expected: SmallVec<[&str; INLINE_SEGMENTS]> = pattern_body.split('/').collect();
    let actual: SmallVec<[&str; INLINE_SEGMENTS]> = path_body.split('/').collect();

    if expected.len() != actual.len() {
        trace!(
            pattern = %pattern,
            path = %path,
            pattern_segments = expected.len(),
            path_segments = actual.len(),
            "Segment count mismatch"
        );
        return None;
    }

    let mut bindings = MatchBindings::default();
    let mut rebuilt = String::with_capacity(path.len() + 1);

    for (pattern_segment, segment) in expected.iter().zip(actual.iter()) {
        if segment.starts_with(DYNAMIC_MARKER) {
            trace!(segment = %segment, "Candidate segment carries the dynamic marker");
            return None;
        }

        if pattern_segment == segment {
            rebuilt.push('/');
            rebuilt.push_str(segment);
            continue;
        }

        let element = elements.iter().find(|e| e.name() == *pattern_segment)?;
        if !element.accepts(segment) {
            trace!(
                element = %element.name(),
                rule = %element.rule_source(),
                segment = %segment,
                "Dynamic element rejected segment"
            );
            return None;
        }

        match *pattern_segment {
            CLASS_PLACEHOLDER => {
                if !fixed.class {
                    bindings.class = Some((*segment).to_owned());
                }
            }
            METHOD_PLACEHOLDER => {
                if !fixed.method {
                    bindings.method = Some((*segment).to_owned());
                }
            }
            name => bindings
                .arguments
                .push((Arc::from(name), (*segment).to_owned())),
        }

        rebuilt.push('/');
        rebuilt.push_str(segment);
    }

    if rebuilt != path {
        trace!(rebuilt = %rebuilt, path = %path, "Rebuilt path differs from candidate");
        return None;
    }

    Some(bindings)
}
