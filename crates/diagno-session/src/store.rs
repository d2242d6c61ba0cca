//! `SessionStore` implementations.
//!
//! `InMemorySessionStore` lives for the process only. `FileSessionStore`
//! persists its map as a single JSON object on disk so a login survives
//! between CLI invocations.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tempfile::NamedTempFile;
use tracing::debug;

use diagno_contracts::error::{DiagnoError, DiagnoResult};
use diagno_core::traits::SessionStore;

type Entries = BTreeMap<String, String>;

fn poisoned<E: std::fmt::Display>(e: E) -> DiagnoError {
    DiagnoError::Store {
        reason: format!("session store lock poisoned: {}", e),
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

/// A process-local store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<Entries>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> DiagnoResult<Option<String>> {
        let entries = self.entries.lock().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DiagnoResult<()> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DiagnoResult<()> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

// ── File-backed ───────────────────────────────────────────────────────────────

/// Keeps the whole map in one JSON file, rewritten on every change.
///
/// The file is read on every `get`, so two stores pointing at the same path
/// see each other's writes. A missing file reads as an empty map.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> DiagnoResult<Entries> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(DiagnoError::Store {
                    reason: format!("failed to read '{}': {}", self.path.display(), e),
                })
            }
        };
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&contents).map_err(|e| DiagnoError::Store {
            reason: format!("'{}' is not a session file: {}", self.path.display(), e),
        })
    }

    /// Replace the file atomically. The new file is readable by the owner
    /// only, since it holds the bearer token.
    fn write(&self, entries: &Entries) -> DiagnoResult<()> {
        let store_error = |what: &str, e: &dyn std::fmt::Display| DiagnoError::Store {
            reason: format!("failed to {} '{}': {}", what, self.path.display(), e),
        };

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| DiagnoError::Store {
                    reason: format!("failed to create '{}': {}", parent.display(), e),
                })?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(entries).map_err(|e| DiagnoError::Store {
            reason: format!("failed to encode session: {}", e),
        })?;

        let mut file = NamedTempFile::new_in(dir).map_err(|e| store_error("stage", &e))?;
        restrict_to_owner(&file).map_err(|e| store_error("protect", &e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| store_error("write", &e))?;
        file.persist(&self.path).map_err(|e| store_error("replace", &e.error))?;

        debug!(path = %self.path.display(), keys = entries.len(), "session file written");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_to_owner(file: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.as_file().set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> DiagnoResult<Option<String>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> DiagnoResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> DiagnoResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}
