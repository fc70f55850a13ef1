//! Read-only key/value configuration lookup.
//!
//! The connection resolver reads its settings through a [`ParamStore`] on
//! every call, so edits made to a [`MemoryParams`] are picked up by the next
//! operation without restarting anything.

use std::collections::HashMap;

use dashmap::DashMap;

/// Read-only key/value parameter lookup.
pub trait ParamStore: Send + Sync {
    /// Get the value for `key`, or `None` if it is not set.
    fn get_param(&self, key: &str) -> Option<String>;

    /// Like [`Self::get_param`] but treats blank values as unset.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get_param(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

/// Parameters held in memory.
#[derive(Debug, Default)]
pub struct MemoryParams {
    values: DashMap<String, String>,
}

impl MemoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a parameter. Returns `true` if it was set.
    pub fn remove(&self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }
}

impl From<HashMap<String, String>> for MemoryParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

impl ParamStore for MemoryParams {
    fn get_param(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }
}

/// Parameters read from environment variables.
///
/// A key `aws_bucket_name` with prefix `ATTACHSTORE_` is looked up as
/// `ATTACHSTORE_AWS_BUCKET_NAME`.
#[derive(Debug, Clone)]
pub struct EnvParams {
    prefix: String,
}

impl EnvParams {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_ascii_uppercase())
    }
}

impl Default for EnvParams {
    fn default() -> Self {
        Self::new("ATTACHSTORE_")
    }
}

impl ParamStore for EnvParams {
    fn get_param(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_params_set_get_remove() {
        let params = MemoryParams::new();
        assert!(params.get_param("aws_bucket_name").is_none());

        params.set("aws_bucket_name", "attachments");
        assert_eq!(params.get_param("aws_bucket_name").as_deref(), Some("attachments"));

        params.set("aws_bucket_name", "attachments-v2");
        assert_eq!(
            params.get_param("aws_bucket_name").as_deref(),
            Some("attachments-v2")
        );

        assert!(params.remove("aws_bucket_name"));
        assert!(!params.remove("aws_bucket_name"));
        assert!(params.get_param("aws_bucket_name").is_none());
    }

    #[test]
    fn get_non_empty_filters_blank_values() {
        let params = MemoryParams::new();
        params.set("aws_prefix_file_name", "   ");
        params.set("aws_region", " eu-west-1 ");
        assert!(params.get_non_empty("aws_prefix_file_name").is_none());
        assert_eq!(params.get_non_empty("aws_region").as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn memory_params_from_map() {
        let map = HashMap::from([("aws_region".to_owned(), "us-west-2".to_owned())]);
        let params = MemoryParams::from(map);
        assert_eq!(params.get_param("aws_region").as_deref(), Some("us-west-2"));
    }

    #[test]
    fn env_params_var_name() {
        let params = EnvParams::default();
        assert_eq!(params.var_name("aws_bucket_name"), "ATTACHSTORE_AWS_BUCKET_NAME");
        let params = EnvParams::new("APP_");
        assert_eq!(params.var_name("aws_region"), "APP_AWS_REGION");
    }

    #[test]
    fn env_params_missing_var() {
        let params = EnvParams::new("ATTACHSTORE_TEST_UNSET_");
        assert!(params.get_param("never_defined").is_none());
    }
}
