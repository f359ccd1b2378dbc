//! Session storage
//!
//! Exactly two keys are persisted: the raw bearer token and the user record
//! serialized as JSON. Reads never fail; anything unreadable is reported as
//! absent so callers fail closed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{Result, SessionError};

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user record
pub const USER_KEY: &str = "user";

/// Key-value store holding the session token and user record
pub trait SessionStore: Send + Sync {
    /// Stored bearer token, if any
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str) -> Result<()>;

    fn clear_token(&self) -> Result<()>;

    /// Stored user record as raw JSON, if any
    fn user_raw(&self) -> Option<String>;

    fn set_user_raw(&self, user_json: &str) -> Result<()>;

    fn clear_user(&self) -> Result<()>;

    /// Remove both keys
    fn clear(&self) -> Result<()> {
        let token = self.clear_token();
        let user = self.clear_user();
        token.and(user)
    }
}

/// In-process store for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: Option<&str>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match value {
            Some(v) => entries.insert(key.to_string(), v.to_string()),
            None => entries.remove(key),
        };
    }
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.put(TOKEN_KEY, Some(token));
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        self.put(TOKEN_KEY, None);
        Ok(())
    }

    fn user_raw(&self) -> Option<String> {
        self.get(USER_KEY)
    }

    fn set_user_raw(&self, user_json: &str) -> Result<()> {
        self.put(USER_KEY, Some(user_json));
        Ok(())
    }

    fn clear_user(&self) -> Result<()> {
        self.put(USER_KEY, None);
        Ok(())
    }
}

/// JSON file store, `~/.folioctl/session.json` by default.
///
/// The file is re-read on every access so a session cleared by another
/// process is seen immediately.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!("Failed to read session file {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed session file {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }

    fn update(&self, key: &str, value: Option<&str>) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries();
        match value {
            Some(v) => {
                entries.insert(key.to_string(), v.to_string());
            }
            None => {
                if entries.remove(key).is_none() && !self.path.exists() {
                    return Ok(());
                }
            }
        }

        self.write_entries(&entries)
            .map_err(|e| SessionError::Storage(format!("{}: {}", self.path.display(), e)).into())
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        write_private(&self.path, contents.as_bytes())
    }
}

/// Write `contents` to `path` so that only the owner can ever read it
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::fs::{OpenOptions, Permissions};
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; an existing file keeps its old bits
    file.set_permissions(Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.read_entries().remove(TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.update(TOKEN_KEY, Some(token))
    }

    fn clear_token(&self) -> Result<()> {
        self.update(TOKEN_KEY, None)
    }

    fn user_raw(&self) -> Option<String> {
        self.read_entries().remove(USER_KEY)
    }

    fn set_user_raw(&self, user_json: &str) -> Result<()> {
        self.update(USER_KEY, Some(user_json))
    }

    fn clear_user(&self) -> Result<()> {
        self.update(USER_KEY, None)
    }
}
