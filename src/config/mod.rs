use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Connection settings for the hosted key table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    #[serde(skip_serializing)]
    pub anon_key: String,
    pub table: String,
    pub column: String,
    pub timeout_secs: u64,
}

/// How a presented key is compared against the stored rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMatchPolicy {
    /// Accept the key if it equals any stored row
    AnyStored,
    /// Accept the key only if it equals the first row returned
    FirstRow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub key_match: KeyMatchPolicy,
    pub allow_query_key: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl SecurityConfig {
    /// No cross-origin access until origins are configured
    fn closed() -> Self {
        Self {
            enable_cors: false,
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let url = lookup("SUPABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let anon_key = lookup("SUPABASE_ANON_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        // Set defaults based on environment, then override with specific env vars
        let mut config = match environment {
            Environment::Production => Self::production(url, anon_key),
            Environment::Staging => Self::staging(url, anon_key),
            Environment::Development => Self::development(url, anon_key),
        };
        config.apply_overrides(&lookup)?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Store overrides
        if let Some(v) = lookup("KEY_STORE_TABLE") {
            self.store.table = v;
        }
        if let Some(v) = lookup("KEY_STORE_COLUMN") {
            self.store.column = v;
        }
        if let Some(v) = lookup("KEY_STORE_TIMEOUT_SECS") {
            self.store.timeout_secs = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::Invalid { name: "KEY_STORE_TIMEOUT_SECS", value: v }),
            };
        }

        // Auth overrides
        if let Some(v) = lookup("AUTH_KEY_MATCH") {
            self.auth.key_match = match v.trim().to_ascii_lowercase().as_str() {
                "any" | "any_stored" => KeyMatchPolicy::AnyStored,
                "first" | "first_row" => KeyMatchPolicy::FirstRow,
                _ => return Err(ConfigError::Invalid { name: "AUTH_KEY_MATCH", value: v }),
            };
        }
        if let Some(v) = lookup("AUTH_ALLOW_QUERY_KEY") {
            self.auth.allow_query_key = v.parse().unwrap_or(self.auth.allow_query_key);
        }

        // API overrides
        if let Some(v) = lookup("API_HOST") {
            self.api.host = v;
        }
        if let Some(port) = lookup("API_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides; listing origins turns CORS on unless explicitly disabled
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !self.security.cors_origins.is_empty() {
                self.security.enable_cors = true;
            }
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        Ok(())
    }

    fn base(environment: Environment, url: String, anon_key: String) -> Self {
        Self {
            environment,
            store: StoreConfig {
                url,
                anon_key,
                table: "api_keys".to_string(),
                column: "api_key".to_string(),
                timeout_secs: 10,
            },
            auth: AuthConfig {
                key_match: KeyMatchPolicy::AnyStored,
                allow_query_key: false,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    pub fn development(url: String, anon_key: String) -> Self {
        let mut config = Self::base(Environment::Development, url, anon_key);
        config.store.timeout_secs = 30;
        config.auth.allow_query_key = true;
        config
    }

    pub fn staging(url: String, anon_key: String) -> Self {
        let mut config = Self::base(Environment::Staging, url, anon_key);
        config.security = SecurityConfig::closed();
        config
    }

    pub fn production(url: String, anon_key: String) -> Self {
        let mut config = Self::base(Environment::Production, url, anon_key);
        config.store.timeout_secs = 5;
        config.api.enable_request_logging = false;
        config.security = SecurityConfig::closed();
        config
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}
