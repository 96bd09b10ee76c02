//! Widget configuration.

use core::num::NonZeroUsize;

use crate::store::DEFAULT_STORAGE_KEY;
use crate::view::DEFAULT_PAGE_SIZE;

pub const ENV_STORAGE_KEY: &str = "STOCKDESK_STORAGE_KEY";
pub const ENV_PAGE_SIZE: &str = "STOCKDESK_PAGE_SIZE";
pub const ENV_CONFIRM_DELETE: &str = "STOCKDESK_CONFIRM_DELETE";

/// How single-row deletes are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Delete as soon as the button is pressed.
    #[default]
    Immediate,
    /// Ask for a yes/no confirmation first; a "no" is a no-op.
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub storage_key: String,
    pub default_page_size: NonZeroUsize,
    pub delete_policy: DeletePolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            delete_policy: DeletePolicy::Immediate,
        }
    }
}

impl WidgetConfig {
    /// Defaults overridden by `STOCKDESK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`WidgetConfig::from_env`] with an injectable lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_STORAGE_KEY).filter(|k| !k.trim().is_empty()) {
            config.storage_key = key.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<NonZeroUsize>() {
                Ok(size) => config.default_page_size = size,
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "ignoring invalid {ENV_PAGE_SIZE}")
                }
            }
        }

        if let Some(raw) = lookup(ENV_CONFIRM_DELETE) {
            match parse_flag(&raw) {
                Some(true) => config.delete_policy = DeletePolicy::Confirm,
                Some(false) => config.delete_policy = DeletePolicy::Immediate,
                None => tracing::warn!(value = %raw, "ignoring invalid {ENV_CONFIRM_DELETE}"),
            }
        }

        config
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_the_widget() {
        let config = WidgetConfig::default();
        assert_eq!(config.storage_key, "products");
        assert_eq!(config.default_page_size.get(), 5);
        assert_eq!(config.delete_policy, DeletePolicy::Immediate);
    }

    #[test]
    fn overrides_from_lookup() {
        let config = WidgetConfig::from_lookup(lookup(&[
            (ENV_STORAGE_KEY, "inventory"),
            (ENV_PAGE_SIZE, "20"),
            (ENV_CONFIRM_DELETE, "yes"),
        ]));
        assert_eq!(config.storage_key, "inventory");
        assert_eq!(config.default_page_size.get(), 20);
        assert_eq!(config.delete_policy, DeletePolicy::Confirm);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = WidgetConfig::from_lookup(lookup(&[
            (ENV_STORAGE_KEY, "   "),
            (ENV_PAGE_SIZE, "0"),
            (ENV_CONFIRM_DELETE, "maybe"),
        ]));
        assert_eq!(config, WidgetConfig::default());
    }
}
