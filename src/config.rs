use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

/// Log line format; defaults to JSON in prod and pretty elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn for_env(env: &Environment, raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            _ if matches!(env, Environment::Prod) => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Where itineraries are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { url: String, max_connections: u32 },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    pub log_format: LogFormat,

    // Persistence
    pub store: StoreBackend,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Lifecycle
    pub auto_apply_promotions: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_format = LogFormat::for_env(&env, env::var("LOG_FORMAT").ok().as_deref());

        // Persistence
        let store = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            _ => {
                let url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
                let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10);
                StoreBackend::Postgres {
                    url,
                    max_connections,
                }
            }
        };

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Lifecycle
        let auto_apply_promotions = env::var("AUTO_APPLY_PROMOTIONS")
            .ok()
            .and_then(|s| parse_bool(&s))
            .unwrap_or(true);

        Ok(Settings {
            env,
            server_addr,
            log_format,
            store,
            cors_allow_origins,
            auto_apply_promotions,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
