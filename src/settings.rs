//! Process settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://library.db?mode=rwc";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Read `DATABASE_URL`, `HOST`, `PORT` and `DB_MAX_CONNECTIONS`; unset keys fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let port = match lookup("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: v })?,
            None => defaults.port,
        };
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => {
                let parsed = v.trim().parse::<u32>().ok().filter(|&n| n > 0);
                parsed.ok_or(ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", value: v })?
            }
            None => defaults.max_connections,
        };
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
