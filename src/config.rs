use anyhow::Context;
use std::str::FromStr;

const DEFAULT_SERVER_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug)]
pub struct Config {
    database_url: String,
    database_max_connections: u32,
    server_port: u16,
    build: BuildInfo,
}

impl Config {
    /// Loads `.env` if present, then reads the settings from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            return Err(err).context("Failed to load .env file");
        }

        let database_url = load_env("DATABASE_URL")?;
        let database_max_connections =
            load_env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let server_port = load_env_or("SERVER_PORT", DEFAULT_SERVER_PORT)?;
        let build = BuildInfo::from_env();
        Ok(Self {
            database_url,
            database_max_connections,
            server_port,
            build,
        })
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub const fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    #[must_use]
    pub const fn server_port(&self) -> u16 {
        self.server_port
    }

    #[must_use]
    pub const fn build(&self) -> &BuildInfo {
        &self.build
    }
}

/// CI pipeline metadata injected into the deployed environment.
#[derive(Debug, Clone, Default)]
pub struct BuildInfo {
    build_id: Option<String>,
    build_number: Option<String>,
    build_reason: Option<String>,
}

impl BuildInfo {
    pub fn new(
        build_id: Option<String>,
        build_number: Option<String>,
        build_reason: Option<String>,
    ) -> Self {
        Self {
            build_id,
            build_number,
            build_reason,
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            std::env::var("BUILD_BUILDID").ok(),
            std::env::var("BUILD_BUILDNUMBER").ok(),
            std::env::var("BUILD_REASON").ok(),
        )
    }

    #[must_use]
    pub fn build_id(&self) -> Option<&str> {
        self.build_id.as_deref()
    }

    #[must_use]
    pub fn build_number(&self) -> Option<&str> {
        self.build_number.as_deref()
    }

    #[must_use]
    pub fn build_reason(&self) -> Option<&str> {
        self.build_reason.as_deref()
    }
}

fn load_env<T>(key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let val =
        std::env::var(key).with_context(|| format!("Failed to load environment variable {key}"))?;
    parse_env(key, &val)
}

fn load_env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(val) => parse_env(key, &val),
        Err(_) => Ok(default),
    }
}

fn parse_env<T>(key: &str, val: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    val.trim()
        .parse::<T>()
        .with_context(|| format!("Failed to parse environment variable {key}"))
}
