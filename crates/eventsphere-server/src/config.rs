use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use eventsphere_storage::{ModePreference, StorageConfig};

/// Server configuration, read from `EVENTSPHERE_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub storage: StorageConfig,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("EVENTSPHERE_HOST", "0.0.0.0");
        let port: u16 = var("EVENTSPHERE_PORT", "4000")
            .parse()
            .context("EVENTSPHERE_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        let preference: ModePreference = var("EVENTSPHERE_STORAGE", "auto").parse()?;

        Ok(Self {
            addr,
            storage: StorageConfig {
                preference,
                db_path: var("EVENTSPHERE_DB_PATH", "eventsphere.db").into(),
                data_dir: var("EVENTSPHERE_DATA_DIR", "./data").into(),
            },
            static_dir: var("EVENTSPHERE_STATIC_DIR", "./html").into(),
            upload_dir: var("EVENTSPHERE_UPLOAD_DIR", "./uploads").into(),
        })
    }
}
