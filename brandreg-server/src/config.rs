//! Settings - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: store URL (required at first store access)
//! - `DATABASE_AUTH_TOKEN`: store credential (required at first store access)
//! - `DATABASE_SCHEMA`: optional search_path for every connection
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `APP_NAME`, `APP_VERSION`: reported by the root route
//! - `FRONTEND_URL`: frontend origin (default: http://localhost:3000)
//! - `CORS_ORIGINS`: comma-separated allowed origins

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const DEFAULT_APP_NAME: &str = "Brand Reg Backend";
const DEFAULT_APP_VERSION: &str = "0.1.0";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Store connection settings
///
/// Missing values are not an error here; the connection manager reports
/// them when it first builds a handle.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub credential: Option<String>,
    pub schema: Option<String>,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            url: non_empty_var("DATABASE_URL"),
            credential: non_empty_var("DATABASE_AUTH_TOKEN"),
            schema: non_empty_var("DATABASE_SCHEMA"),
            max_connections: non_empty_var("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        }
    }

    /// Explicit store settings (for testing and scripts)
    pub fn new(url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            credential: Some(credential.into()),
            schema: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub frontend_url: String,
    pub cors_origins: Vec<String>,
    pub store: StoreConfig,
}

impl Settings {
    /// Create settings from environment variables
    pub fn from_env() -> Self {
        let frontend_url =
            non_empty_var("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());
        let cors = non_empty_var("CORS_ORIGINS").unwrap_or_else(|| {
            format!("http://localhost:3000,http://127.0.0.1:3000,{}", frontend_url)
        });

        Self {
            app_name: non_empty_var("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_version: non_empty_var("APP_VERSION")
                .unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            cors_origins: parse_origins(&cors),
            frontend_url,
            store: StoreConfig::from_env(),
        }
    }

    /// Defaults with explicit store settings (for testing)
    pub fn with_store(store: StoreConfig) -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            cors_origins: parse_origins("http://localhost:3000,http://127.0.0.1:3000"),
            store,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated origin list, dropping blanks and duplicates.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();
    for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        if !origins.iter().any(|o| o == origin) {
            origins.push(origin.to_string());
        }
    }
    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_deduplicated() {
        let origins = parse_origins(" http://a.test ,, http://b.test,http://a.test ");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn explicit_store_config() {
        let store = StoreConfig::new("postgres://localhost/brandreg", "secret")
            .with_schema("brandreg_test");
        assert_eq!(store.url.as_deref(), Some("postgres://localhost/brandreg"));
        assert_eq!(store.credential.as_deref(), Some("secret"));
        assert_eq!(store.schema.as_deref(), Some("brandreg_test"));
        assert_eq!(store.max_connections, 5);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::with_store(StoreConfig::default());
        assert_eq!(settings.app_name, "Brand Reg Backend");
        assert_eq!(settings.cors_origins.len(), 2);
        assert!(settings.store.url.is_none());
    }
}
