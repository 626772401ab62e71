use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub list: ListConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the platform API this gateway fronts
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub access_token_ttl_hours: i64,
    pub refresh_token_ttl_hours: i64,
    /// Cookies are marked Secure when true (off in development so plain
    /// http://localhost works)
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub default_limit: u32,
    pub search_debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Backend overrides
        if let Ok(v) = env::var("GUARDPOST_BACKEND_URL") {
            self.backend.base_url = v;
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_ACCESS_TOKEN_TTL_HOURS") {
            self.session.access_token_ttl_hours =
                v.parse().unwrap_or(self.session.access_token_ttl_hours);
        }
        if let Ok(v) = env::var("SESSION_REFRESH_TOKEN_TTL_HOURS") {
            self.session.refresh_token_ttl_hours =
                v.parse().unwrap_or(self.session.refresh_token_ttl_hours);
        }
        if let Ok(v) = env::var("SESSION_SECURE_COOKIES") {
            self.session.secure_cookies = v.parse().unwrap_or(self.session.secure_cookies);
        }

        // List overrides
        if let Ok(v) = env::var("LIST_DEFAULT_LIMIT") {
            self.list.default_limit = v.parse().unwrap_or(self.list.default_limit);
        }
        if let Ok(v) = env::var("LIST_SEARCH_DEBOUNCE_MS") {
            self.list.search_debounce_ms = v.parse().unwrap_or(self.list.search_debounce_ms);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }
        if let Ok(v) = env::var("API_CORS_ORIGINS") {
            self.api.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig {
                base_url: "http://localhost:8000".to_string(),
            },
            session: SessionConfig {
                access_token_ttl_hours: 12,
                refresh_token_ttl_hours: 24,
                secure_cookies: false,
            },
            list: ListConfig {
                default_limit: 10,
                search_debounce_ms: 500,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            backend: BackendConfig {
                base_url: "https://api.staging.example.com".to_string(),
            },
            session: SessionConfig {
                access_token_ttl_hours: 12,
                refresh_token_ttl_hours: 24,
                secure_cookies: true,
            },
            list: ListConfig {
                default_limit: 10,
                search_debounce_ms: 500,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig {
                base_url: "https://api.example.com".to_string(),
            },
            session: SessionConfig {
                access_token_ttl_hours: 12,
                refresh_token_ttl_hours: 24,
                secure_cookies: true,
            },
            list: ListConfig {
                default_limit: 10,
                search_debounce_ms: 500,
            },
            api: ApiConfig {
                enable_request_logging: false,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
