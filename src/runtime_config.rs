//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the dispatcher.
//!
//! ## Environment Variables
//!
//! ### `SEGR_CLASS_PATH`
//!
//! Directory handler sources live in. One trailing `/` is normalised.
//!
//! ### `SEGR_HANDLER_SUFFIX`
//!
//! Naming suffix appended to every class name, e.g. `Controller` turns class
//! `orders` into source `ordersController.rs` and type `ordersController`.
//!
//! Unset or empty variables leave the value unset, so a route file's
//! `[dispatcher]` table (or the built-in default) applies.
//!
//! ## Usage
//!
//! ```rust
//! use segrouter::runtime_config::DispatcherConfig;
//!
//! let config = DispatcherConfig::from_env();
//! println!("class path: {:?}", config.class_path);
//! ```

use serde::{Deserialize, Serialize};
use std::env;

pub const CLASS_PATH_ENV: &str = "SEGR_CLASS_PATH";
pub const HANDLER_SUFFIX_ENV: &str = "SEGR_HANDLER_SUFFIX";

/// Dispatcher configuration.
///
/// Both values are optional; [`Dispatcher::from_config`](crate::dispatcher::Dispatcher::from_config)
/// keeps its defaults for whatever is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Directory handler sources live in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_path: Option<String>,
    /// Naming suffix for handler sources and types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl DispatcherConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.is_empty());
        DispatcherConfig {
            class_path: read(CLASS_PATH_ENV),
            suffix: read(HANDLER_SUFFIX_ENV),
        }
    }

    /// Layer `other` on top of `self`: values set in `other` win.
    #[must_use]
    pub fn overridden_by(self, other: DispatcherConfig) -> Self {
        DispatcherConfig {
            class_path: other.class_path.or(self.class_path),
            suffix: other.suffix.or(self.suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_unset_variables() {
        let config = DispatcherConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DispatcherConfig::default());
    }

    #[test]
    fn test_variables_read() {
        let config = DispatcherConfig::from_lookup(lookup(&[
            (CLASS_PATH_ENV, "app/handlers"),
            (HANDLER_SUFFIX_ENV, "Controller"),
        ]));
        assert_eq!(config.class_path.as_deref(), Some("app/handlers"));
        assert_eq!(config.suffix.as_deref(), Some("Controller"));
    }

    #[test]
    fn test_empty_variable_is_unset() {
        let config = DispatcherConfig::from_lookup(lookup(&[(HANDLER_SUFFIX_ENV, "")]));
        assert_eq!(config.suffix, None);
    }

    #[test]
    fn test_override_keeps_unset_values() {
        let file = DispatcherConfig {
            class_path: Some("handlers".to_string()),
            suffix: Some("Class".to_string()),
        };
        let env = DispatcherConfig {
            class_path: None,
            suffix: Some("Controller".to_string()),
        };
        let merged = file.overridden_by(env);
        assert_eq!(merged.class_path.as_deref(), Some("handlers"));
        assert_eq!(merged.suffix.as_deref(), Some("Controller"));
    }
}
