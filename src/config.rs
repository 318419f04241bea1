//! Startup configuration, read from the environment (and `.env`, if present).

use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_MODEL: &str = "ZhipuAI/GLM-4.6";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Where chat history lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted Supabase project, reached over its REST API.
    Supabase,
    /// Local SQLite database, mainly for development.
    Sqlite,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub completion_api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub store_url: String,
    pub store_service_key: String,
    pub store_backend: StoreBackend,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the settings from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let completion_api_key = required("COMPLETION_API_KEY")?;
        let completion_base_url = required("COMPLETION_BASE_URL")?;
        let store_url = required("STORE_URL")?;
        let store_service_key = required("STORE_SERVICE_KEY")?;

        let store_backend = if store_url.starts_with("sqlite:") {
            StoreBackend::Sqlite
        } else if store_url.starts_with("https://") || store_url.starts_with("http://") {
            StoreBackend::Supabase
        } else {
            return Err(ConfigError::UnsupportedStoreUrl(store_url));
        };

        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let completion_model =
            optional("COMPLETION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        Ok(Settings {
            completion_api_key,
            completion_base_url,
            completion_model,
            store_url,
            store_service_key,
            store_backend,
            bind_addr,
        })
    }
}

/// Masks a secret for logging: the first 7 and last 4 characters survive, short secrets are
/// hidden completely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 11 {
        return "***".to_owned();
    }

    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}
