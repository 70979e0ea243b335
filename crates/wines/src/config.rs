use std::env;

use wines_core::wine::KeyType;

/// Base name of the wine table before the stage suffix is applied.
pub const BASE_TABLE_NAME: &str = "wineDB";

/// Application configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fully resolved table name (default: "wineDB").
    pub table_name: String,
    /// Region of the table. Falls back to the AWS default chain when unset.
    pub region: Option<String>,
    /// Declared type of the `id` partition key (default: numeric).
    pub key_type: KeyType,
    /// Endpoint override, e.g. a local DynamoDB.
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_REGION` - Region of the table
    /// - `ENV` - Deployment stage; appended as `wineDB-<ENV>` unless `NONE`
    /// - `PARTITION_KEY_TYPE` - `N` or `S` (default: `N`)
    /// - `DYNAMODB_ENDPOINT_URL` - Endpoint override
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let stage = lookup("ENV");

        Self {
            table_name: resolve_table_name(BASE_TABLE_NAME, stage.as_deref()),
            region: lookup("TABLE_REGION").filter(|v| !v.is_empty()),
            key_type: lookup("PARTITION_KEY_TYPE")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            endpoint_url: lookup("DYNAMODB_ENDPOINT_URL").filter(|v| !v.is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Appends the deployment stage to `base` unless the stage is absent, empty
/// or `NONE`.
pub fn resolve_table_name(base: &str, stage: Option<&str>) -> String {
    match stage {
        Some(stage) if !stage.is_empty() && stage != "NONE" => format!("{base}-{stage}"),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_resolve_table_name() {
        assert_eq!(resolve_table_name("wineDB", None), "wineDB");
        assert_eq!(resolve_table_name("wineDB", Some("NONE")), "wineDB");
        assert_eq!(resolve_table_name("wineDB", Some("")), "wineDB");
        assert_eq!(resolve_table_name("wineDB", Some("dev")), "wineDB-dev");
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.table_name, "wineDB");
        assert_eq!(config.region, None);
        assert_eq!(config.key_type, KeyType::Number);
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("ENV", "prod"),
            ("TABLE_REGION", "eu-west-1"),
            ("PARTITION_KEY_TYPE", "S"),
            ("DYNAMODB_ENDPOINT_URL", "http://localhost:8000"),
        ]));

        assert_eq!(config.table_name, "wineDB-prod");
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.key_type, KeyType::Text);
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn test_invalid_key_type_falls_back_to_numeric() {
        let config = Config::from_lookup(lookup_from(&[("PARTITION_KEY_TYPE", "B")]));
        assert_eq!(config.key_type, KeyType::Number);
    }
}
