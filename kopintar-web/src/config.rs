//! Client configuration
//!
//! Browsers have no process environment, so overrides are read at build time:
//! 1. `KOPINTAR_*` variables present when the crate is compiled
//! 2. Default values

use kopintar_common::listing::PAGE_SIZE;

/// Runtime settings shared through the component tree
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL without trailing slash
    pub api_base: String,
    /// Log every request and response to the console
    pub debug_http: bool,
    /// LocalStorage key of the bearer token
    pub token_key: &'static str,
    /// Rows per page on the farmer list
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".to_string(),
            debug_http: cfg!(debug_assertions),
            token_key: "access_token",
            page_size: PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Defaults with build-time overrides applied
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_overrides(
            option_env!("KOPINTAR_API_BASE"),
            option_env!("KOPINTAR_DEBUG_HTTP"),
        );
        config
    }

    fn apply_overrides(&mut self, api_base: Option<&str>, debug_http: Option<&str>) {
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(flag) = debug_http {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.debug_http = true,
                "0" | "false" | "no" | "off" => self.debug_http = false,
                _ => {}
            }
        }
    }

    /// Absolute URL of a backend path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:8000");
        assert_eq!(config.token_key, "access_token");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some(" https://api.kopintar.id/ "), Some("off"));
        assert_eq!(config.api_base, "https://api.kopintar.id");
        assert!(!config.debug_http);

        config.apply_overrides(Some(""), Some("TRUE"));
        assert_eq!(config.api_base, "https://api.kopintar.id");
        assert!(config.debug_http);

        config.apply_overrides(None, Some("maybe"));
        assert!(config.debug_http);
    }

    #[test]
    fn test_url_joining() {
        let config = AppConfig::default();
        assert_eq!(config.url("/petani/"), "http://127.0.0.1:8000/petani/");
        assert_eq!(config.url("token"), "http://127.0.0.1:8000/token");
        assert_eq!(config.url("https://x.test/a"), "https://x.test/a");
    }
}
