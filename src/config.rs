//! Environment configuration.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;
use crate::domain::value_objects::MediaOrigin;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_PUBLIC_URL: &str = "http://localhost:9000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_UPLOADS_DIR: &str = "static/uploads";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins { Any, List(Vec<String>) }

impl CorsOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw.split(',').map(str::trim).filter(|o| !o.is_empty()).map(str::to_string).collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") { Self::Any } else { Self::List(origins) }
    }
}

/// Knobs of the homepage aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomepageConfig {
    /// Section name to collection id or handle.
    pub section_collections: HashMap<String, String>,
    /// Section name to the tag used when no collection yields products.
    pub section_tags: HashMap<String, String>,
    /// Re-retrieve every grid product by id before serving it.
    pub verify_products: bool,
}

impl Default for HomepageConfig {
    fn default() -> Self { Self { section_collections: HashMap::new(), section_tags: HashMap::new(), verify_products: true } }
}

impl HomepageConfig {
    pub fn collection_for(&self, section: &str) -> Option<&str> { self.section_collections.get(section).map(String::as_str) }
    pub fn tag_for(&self, section: &str) -> Option<&str> { self.section_tags.get(section).map(String::as_str) }
}

/// Parses a JSON object of section name to string (or array of strings,
/// first element wins). Anything malformed degrades to an empty mapping.
pub fn parse_section_map(var: &str, raw: &str) -> HashMap<String, String> {
    let object = match serde_json::from_str::<serde_json::Map<String, Value>>(raw) {
        Ok(object) => object,
        Err(e) => {
            tracing::warn!(var, error = %e, "ignoring malformed section mapping");
            return HashMap::new();
        }
    };
    object.into_iter()
        .filter_map(|(section, value)| {
            let picked = match value {
                Value::String(s) => Some(s),
                Value::Array(items) => items.into_iter().next().and_then(|v| v.as_str().map(str::to_string)),
                _ => None,
            };
            match picked.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
                Some(s) => Some((section, s)),
                None => {
                    tracing::debug!(var, section = %section, "skipping non-string section mapping entry");
                    None
                }
            }
        })
        .collect()
}

#[derive(Clone, Debug, Validate)]
pub struct AppConfig {
    pub database_url: Option<String>,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(url)]
    pub public_url: String,
    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,
    pub cors: CorsOrigins,
    pub uploads_dir: PathBuf,
    pub homepage: HomepageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid { key: "PORT", message: e.to_string() })?,
            None => DEFAULT_PORT,
        };
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", message: e.to_string() })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let verify_products = match get("HOMEPAGE_VERIFY_PRODUCTS") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "HOMEPAGE_VERIFY_PRODUCTS", message: raw })?,
            None => true,
        };

        let config = Self {
            database_url: get("DATABASE_URL"),
            port,
            // MEDUSA_URL is the name older deployments set
            public_url: get("STORE_PUBLIC_URL").or_else(|| get("MEDUSA_URL")).unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            max_connections,
            cors: get("STORE_CORS").map(|raw| CorsOrigins::parse(&raw)).unwrap_or(CorsOrigins::Any),
            uploads_dir: PathBuf::from(get("UPLOADS_DIR").unwrap_or_else(|| DEFAULT_UPLOADS_DIR.to_string())),
            homepage: HomepageConfig {
                section_collections: get("HOMEPAGE_COLLECTIONS").map(|raw| parse_section_map("HOMEPAGE_COLLECTIONS", &raw)).unwrap_or_default(),
                section_tags: get("HOMEPAGE_SECTION_TAGS").map(|raw| parse_section_map("HOMEPAGE_SECTION_TAGS", &raw)).unwrap_or_default(),
                verify_products,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url.as_deref().ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    pub fn origin(&self) -> MediaOrigin { MediaOrigin::new(self.public_url.as_str()) }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
