//! Per-visitor compile counters.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::{Error, Result};

/// A ledger mapping each visitor identity to the number of compiles it has run.
pub trait UsageStore: Send + Sync {
    /// The current count for `identity`; unknown identities have a count of zero.
    fn count(&self, identity: &str) -> Result<u64>;

    /// Add one to the count for `identity`, persist it, and return the new count.
    fn increment(&self, identity: &str) -> Result<u64>;
}

/// Keeps counts in memory only; they are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    counts: Mutex<HashMap<String, u64>>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn counts(&self) -> Result<MutexGuard<'_, HashMap<String, u64>>> {
        self.counts
            .lock()
            .map_err(|_| Error::Ledger("usage counters were poisoned".to_string()))
    }
}

impl UsageStore for InMemoryUsageStore {
    fn count(&self, identity: &str) -> Result<u64> {
        Ok(self.counts()?.get(identity).copied().unwrap_or(0))
    }

    fn increment(&self, identity: &str) -> Result<u64> {
        let mut counts = self.counts()?;
        let count = counts.entry(identity.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}

/// Keeps counts in a JSON object on disk, `{"<identity>": <count>, ...}`.
///
/// The file is re-read on every call so edits made while the server runs are honored, and it is
/// rewritten through a temporary sibling file and a rename, so a crash mid-write leaves the old
/// ledger in place.
#[derive(Debug)]
pub struct JsonFileUsageStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileUsageStore {
    /// Open the ledger at `path`, creating it as an empty object if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            write_ledger(&path, &HashMap::new())?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Ledger(format!("{} lock was poisoned", self.path.display())))
    }
}

impl UsageStore for JsonFileUsageStore {
    fn count(&self, identity: &str) -> Result<u64> {
        let _guard = self.guard()?;
        Ok(read_ledger(&self.path)?.get(identity).copied().unwrap_or(0))
    }

    fn increment(&self, identity: &str) -> Result<u64> {
        let _guard = self.guard()?;
        let mut ledger = read_ledger(&self.path)?;
        let count = ledger.entry(identity.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        write_ledger(&self.path, &ledger)?;
        Ok(count)
    }
}

fn read_ledger(path: &Path) -> Result<HashMap<String, u64>> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(err) => Err(err.into()),
    }
}

fn write_ledger(path: &Path, ledger: &HashMap<String, u64>) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = fs::File::create(&tmp)?;
    serde_json::to_writer(&mut file, ledger)?;
    file.flush()?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
