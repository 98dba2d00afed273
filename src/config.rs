use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::Error;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// The JSON database file (default: `db.json`).
    pub db_path: PathBuf,
    /// Value of `Access-Control-Allow-Origin` (default: `*`).
    pub cors_origin: String,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var       | Default   |
    /// |---------------|-----------|
    /// | `HOST`        | `0.0.0.0` |
    /// | `PORT`        | `3000`    |
    /// | `DB_PATH`     | `db.json` |
    /// | `CORS_ORIGIN` | `*`       |
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let host: IpAddr = host
            .parse()
            .map_err(|e| Error::Config(format!("HOST `{host}` is not an IP address: {e}")))?;

        let port = lookup("PORT").unwrap_or_else(|| "3000".into());
        let port: u16 = port
            .parse()
            .map_err(|e| Error::Config(format!("PORT `{port}` must be a valid u16: {e}")))?;

        let db_path = lookup("DB_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("db.json"));

        let cors_origin = lookup("CORS_ORIGIN")
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "*".into());

        Ok(Self { host, port, db_path, cors_origin })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
