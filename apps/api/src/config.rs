use anyhow::{bail, Context, Result};

/// Which `PortfolioStore` implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: StoreBackend,
    /// Only required for the Postgres backend.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// `["*"]` means any origin.
    pub cors_allow_origins: Vec<String>,
    /// Pins which row `GET /profile` serves. Lowest id when unset.
    pub profile_id: Option<i32>,
    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend = StoreBackend::parse(
            &std::env::var("STORE_BACKEND").unwrap_or_else(|_| "postgres".to_string()),
        )?;

        let database_url = match backend {
            StoreBackend::Postgres => Some(require_env("DATABASE_URL")?),
            StoreBackend::Memory => std::env::var("DATABASE_URL").ok(),
        };

        Ok(Config {
            backend,
            database_url,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_allow_origins: parse_origins(
                &std::env::var("CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            profile_id: std::env::var("PROFILE_ID")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim().parse::<i32>())
                .transpose()
                .context("PROFILE_ID must be an integer")?,
            // An empty memory store has nothing to serve, so it seeds by default.
            seed_on_start: parse_bool(
                std::env::var("SEED_ON_START").ok().as_deref(),
                backend == StoreBackend::Memory,
            )?,
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Config {
            backend: StoreBackend::Memory,
            database_url: None,
            db_max_connections: 1,
            port: 3000,
            rust_log: "info".to_string(),
            cors_allow_origins: vec!["*".to_string()],
            profile_id: None,
            seed_on_start: true,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

fn parse_bool(raw: Option<&str>, default: bool) -> Result<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(s) if s.is_empty() => Ok(default),
        Some(s) => match s.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => bail!("expected a boolean, got '{s}'"),
        },
    }
}
