use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use eventsphere_types::models::{
    Account, Event, NewAccount, NewEvent, NewRegistration, Registration, sort_events,
};

use crate::{Store, StoreError, StoreResult};

pub const EVENTS_FILE: &str = "events.json";
pub const REGISTRATIONS_FILE: &str = "registrations.json";
pub const ACCOUNTS_FILE: &str = "accounts.json";

/// A JSON file holding one top-level array.
///
/// Every mutation is a full read-modify-write under the file's mutex, and
/// the new contents replace the old through a rename, so a crash mid-write
/// leaves the previous array in place. Other processes writing the same file
/// are not coordinated with.
struct JsonArrayFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonArrayFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create the file as `[]` if it does not exist yet. Existing contents are
    /// left alone, even if they do not parse.
    fn ensure_exists(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        fs::write(&self.path, "[]").map_err(|e| StoreError::io(&self.path, e))?;
        info!("Created empty data file {}", self.path.display());
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        let data = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("File lock poisoned: {}", e).into())
    }

    fn update<T, R, F>(&self, f: F) -> StoreResult<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> StoreResult<R>,
    {
        let _guard = self.lock()?;

        let mut records = self.read()?;
        let out = f(&mut records)?;
        self.replace(&records)?;
        Ok(out)
    }

    fn replace<T: Serialize>(&self, records: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

/// Next id for an append-only array: one past the largest id seen, so ids
/// stay unique even if records were ever removed from the file.
fn next_id<T>(records: &[T], id: impl Fn(&T) -> i64) -> i64 {
    records.iter().map(id).max().unwrap_or(0) + 1
}

/// FILE-mode store: three JSON array files in one data directory. No schema
/// constraints are enforced.
pub struct FileStore {
    dir: PathBuf,
    events: JsonArrayFile,
    registrations: JsonArrayFile,
    accounts: JsonArrayFile,
}

impl FileStore {
    /// Create the data directory and any missing data files.
    pub fn init(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let store = Self {
            events: JsonArrayFile::new(dir.join(EVENTS_FILE)),
            registrations: JsonArrayFile::new(dir.join(REGISTRATIONS_FILE)),
            accounts: JsonArrayFile::new(dir.join(ACCOUNTS_FILE)),
            dir,
        };
        store.events.ensure_exists()?;
        store.registrations.ensure_exists()?;
        store.accounts.ensure_exists()?;

        info!("File storage initialized at {}", store.dir.display());
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Store for FileStore {
    fn list_events(&self) -> StoreResult<Vec<Event>> {
        let mut events: Vec<Event> = self.events.read()?;
        sort_events(&mut events);
        Ok(events)
    }

    fn seed_if_empty(&self, catalog: &[NewEvent]) -> StoreResult<usize> {
        let _guard = self.events.lock()?;

        // Populated files are never rewritten here.
        let existing: Vec<serde_json::Value> = self.events.read()?;
        if !existing.is_empty() {
            debug!("{} already holds {} events, skipping seed", EVENTS_FILE, existing.len());
            return Ok(0);
        }

        let events: Vec<Event> = catalog
            .iter()
            .zip(1..)
            .map(|(event, id)| event.with_id(id))
            .collect();
        self.events.replace(&events)?;
        Ok(events.len())
    }

    fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let accounts: Vec<Account> = self.accounts.read()?;
        Ok(accounts.iter().any(|a| a.email == email))
    }

    fn insert_account(&self, account: NewAccount) -> StoreResult<i64> {
        self.accounts.update(|accounts: &mut Vec<Account>| {
            let id = next_id(accounts, |a| a.id);
            accounts.push(account.into_account(id, Utc::now()));
            Ok(id)
        })
    }

    fn insert_registration(&self, registration: NewRegistration) -> StoreResult<i64> {
        self.registrations.update(|registrations: &mut Vec<Registration>| {
            let id = next_id(registrations, |r| r.id);
            registrations.push(registration.into_registration(id, Utc::now()));
            Ok(id)
        })
    }
}
