use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::category::{CategoryCatalog, CategoryCatalogError, CategoryOption};
use crate::services::submission::FormOptions;

/// Catalog service endpoint used when `CATALOG_SERVICE_URL` is not set.
pub const DEFAULT_CATALOG_SERVICE_URL: &str = "https://supermercadoapi.vercel.app/products";

/// Errors raised while reading the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} value `{value}`")]
    InvalidValue { name: &'static str, value: String },
    #[error("failed to read categories from {path}: {source}")]
    CategoriesIo {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse categories from {path}: {source}")]
    CategoriesJson {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid category list: {0}")]
    Catalog(#[from] CategoryCatalogError),
}

/// Settings the server reads from the environment on startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Key material for the flash message cookies.
    pub secret: Option<String>,
    pub catalog_service_url: String,
    pub show_notifications: bool,
    /// Optional JSON file with `[{"value": 1, "label": "..."}]` entries.
    pub categories_path: Option<PathBuf>,
    pub templates_glob: String,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of a
    /// variable when it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "PORT",
                    value,
                })?,
            None => 8080,
        };

        let show_notifications = match lookup("SHOW_NOTIFICATIONS") {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidValue {
                name: "SHOW_NOTIFICATIONS",
                value,
            })?,
            None => true,
        };

        Ok(Self {
            address: lookup("ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            secret: lookup("SECRET_KEY").filter(|value| !value.is_empty()),
            catalog_service_url: lookup("CATALOG_SERVICE_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_SERVICE_URL.to_string()),
            show_notifications,
            categories_path: lookup("CATEGORIES_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            templates_glob: lookup("TEMPLATES_GLOB")
                .unwrap_or_else(|| "templates/**/*".to_string()),
        })
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            show_notifications: self.show_notifications,
        }
    }

    /// Category list from `CATEGORIES_PATH`, or the bundled one.
    pub fn category_catalog(&self) -> Result<CategoryCatalog, ConfigError> {
        match &self.categories_path {
            Some(path) => load_categories(path),
            None => Ok(CategoryCatalog::builtin()),
        }
    }
}

/// Load a category list from a JSON file; the first entry is the default.
pub fn load_categories(path: &Path) -> Result<CategoryCatalog, ConfigError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::CategoriesIo {
        path: display.clone(),
        source,
    })?;
    let options: Vec<CategoryOption> =
        serde_json::from_str(&contents).map_err(|source| ConfigError::CategoriesJson {
            path: display,
            source,
        })?;

    Ok(CategoryCatalog::with_first_as_default(options)?)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("expected defaults");

        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_service_url, DEFAULT_CATALOG_SERVICE_URL);
        assert!(config.show_notifications);
        assert!(config.secret.is_none());
        assert!(config.categories_path.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("SHOW_NOTIFICATIONS", "off"),
            ("CATALOG_SERVICE_URL", "http://localhost:4000/products"),
        ])
        .expect("expected config");

        assert_eq!(config.port, 9000);
        assert!(!config.form_options().show_notifications);
        assert_eq!(config.catalog_service_url, "http://localhost:4000/products");
    }

    #[test]
    fn rejects_invalid_port_and_flag() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("SHOW_NOTIFICATIONS", "maybe")]),
            Err(ConfigError::InvalidValue {
                name: "SHOW_NOTIFICATIONS",
                ..
            })
        ));
    }

    #[test]
    fn loads_categories_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"value": 10, "label": "Pet"}}, {{"value": 11, "label": "Bazar"}}]"#
        )
        .expect("write categories");

        let catalog = load_categories(file.path()).expect("expected catalog");

        assert_eq!(catalog.default_value(), 10);
        assert_eq!(catalog.options().len(), 2);
        assert!(catalog.contains(11));
    }

    #[test]
    fn rejects_empty_category_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[]").expect("write categories");

        let result = load_categories(file.path());

        assert!(matches!(
            result,
            Err(ConfigError::Catalog(CategoryCatalogError::Empty))
        ));
    }
}
