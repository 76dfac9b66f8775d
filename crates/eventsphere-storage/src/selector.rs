use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::{FileStore, RelationalStore, Store};

/// The persistence mode resolved at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Relational,
    File,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::File => "file",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured preference. `Auto` probes the database and falls back to files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModePreference {
    #[default]
    Auto,
    Relational,
    File,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown storage mode '{0}' (expected auto, relational or file)")]
pub struct UnknownMode(String);

impl FromStr for ModePreference {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "relational" | "sqlite" | "db" => Ok(Self::Relational),
            "file" | "json" => Ok(Self::File),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub preference: ModePreference,
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

/// The store chosen for this process, plus the mode it runs in.
#[derive(Clone)]
pub struct Storage {
    pub mode: StorageMode,
    pub store: Arc<dyn Store>,
}

impl Storage {
    /// Resolve the storage mode once. With `Auto`, any failure opening the
    /// database downgrades the process to FILE mode for its whole lifetime.
    pub fn open(config: &StorageConfig) -> anyhow::Result<Self> {
        match config.preference {
            ModePreference::Relational => {
                let store = RelationalStore::open(&config.db_path).with_context(|| {
                    format!("failed to open database at {}", config.db_path.display())
                })?;
                Ok(Self::relational(store))
            }
            ModePreference::File => Self::file(config),
            ModePreference::Auto => match RelationalStore::open(&config.db_path) {
                Ok(store) => Ok(Self::relational(store)),
                Err(e) => {
                    warn!(
                        "Database at {} unavailable: {:#}",
                        config.db_path.display(),
                        e
                    );
                    warn!("Falling back to file storage");
                    Self::file(config)
                }
            },
        }
    }

    fn relational(store: RelationalStore) -> Self {
        info!("Storage mode: relational");
        Self {
            mode: StorageMode::Relational,
            store: Arc::new(store),
        }
    }

    fn file(config: &StorageConfig) -> anyhow::Result<Self> {
        let store = FileStore::init(&config.data_dir)?;
        info!("Storage mode: file ({})", store.dir().display());
        Ok(Self {
            mode: StorageMode::File,
            store: Arc::new(store),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_preferences() {
        assert_eq!("auto".parse::<ModePreference>().unwrap(), ModePreference::Auto);
        assert_eq!(" File ".parse::<ModePreference>().unwrap(), ModePreference::File);
        assert_eq!(
            "relational".parse::<ModePreference>().unwrap(),
            ModePreference::Relational
        );
        let err = "mysql".parse::<ModePreference>().unwrap_err();
        assert!(err.to_string().contains("'mysql'"));
    }

    #[test]
    fn mode_display() {
        assert_eq!(StorageMode::Relational.to_string(), "relational");
        assert_eq!(StorageMode::File.to_string(), "file");
    }
}
