use crate::error::{BadEnvVarSnafu, KampusResult, ParseNumberSnafu, UnknownStoreKindSnafu};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::{env::VarError, sync::Arc};

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: String,
    store: StoreConfig,
}

#[derive(Clone, Debug)]
pub enum StoreConfig {
    Postgres(Arc<DbConfig>),
    Memory,
}

impl RuntimeConfiguration {
    pub fn new() -> KampusResult<Self> {
        let port = env_or("PORT", "3000")?;
        let server_ip = env_or("KAMPUS_SERVER_IP", &default_server_ip(&port))?;

        let store = match parse_store_kind(&env_or("KAMPUS_STORE", "postgres")?)? {
            StoreKind::Postgres => StoreConfig::Postgres(Arc::new(DbConfig::new()?)),
            StoreKind::Memory => StoreConfig::Memory,
        };

        Ok(Self { server_ip, store })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub fn store(&self) -> StoreConfig {
        self.store.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreKind {
    Postgres,
    Memory,
}

/// Every interface on `port`.
fn default_server_ip(port: &str) -> String {
    format!("0.0.0.0:{port}")
}

fn parse_store_kind(kind: &str) -> KampusResult<StoreKind> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(StoreKind::Postgres),
        "memory" => Ok(StoreKind::Memory),
        _ => UnknownStoreKindSnafu { kind }.fail(),
    }
}

/// Reads `name`, falling back to `default` only when it is not set at all.
fn env_or(name: &'static str, default: &str) -> KampusResult<String> {
    match var(name) {
        Ok(value) => Ok(value),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(default.to_string()),
        Err(e) => Err(e).context(BadEnvVarSnafu { name }),
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    host: String,
    port: u16,
    database: String,
    max_connections: u32,
}

impl DbConfig {
    pub fn new() -> KampusResult<Self> {
        Ok(Self {
            user: env_or("DB_USER", "postgres")?,
            password: SecretString::from(env_or("DB_PASSWORD", "")?),
            host: env_or("DB_HOST", "localhost")?,
            port: env_or("DB_PORT", "5432")?
                .parse()
                .context(ParseNumberSnafu { name: "DB_PORT" })?,
            database: env_or("DB_NAME", "kampus_db")?,
            max_connections: env_or("DB_MAX_CONNECTIONS", "10")?
                .parse()
                .context(ParseNumberSnafu {
                    name: "DB_MAX_CONNECTIONS",
                })?,
        })
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database
        )
    }
}
