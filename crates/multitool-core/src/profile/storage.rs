//! Profile persistence (load-all / save-all)

use crate::error::{CoreError, CoreResult};
use crate::profile::set::duplicate_name;
use crate::profile::{default_profiles, Profile};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// File-backed store of the full profile set
///
/// The whole set is the unit of persistence: callers load it, edit the list
/// and save it back. The last full save wins.
pub struct ProfileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ProfileStore {
    /// Create a store backed by the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every profile
    ///
    /// When the file does not exist yet, the default profiles are written and
    /// returned.
    ///
    /// # Errors
    /// Returns `CorruptStore` if the file cannot be parsed, or `Persistence`
    /// if it cannot be read or the defaults cannot be written
    pub fn load_all(&self) -> CoreResult<Vec<Profile>> {
        let _guard = self.guard();
        self.load_locked()
    }

    /// Replace the persisted set with `profiles`
    ///
    /// # Errors
    /// Returns `Validation` if the set is empty or repeats a name;
    /// `Persistence` if the write fails. Nothing is written in either case.
    /// Field-level checks belong to `set::upsert`, so a set that loaded can
    /// always be saved back.
    pub fn save_all(&self, profiles: &[Profile]) -> CoreResult<()> {
        let _guard = self.guard();
        self.save_locked(profiles)
    }

    /// Load, edit and save the set as one critical section
    ///
    /// The closure edits the working set; if it fails, nothing is saved.
    /// Returns the closure's value along with the saved set.
    ///
    /// # Errors
    /// Propagates load, closure and save errors
    pub fn update<T, F>(&self, edit: F) -> CoreResult<(T, Vec<Profile>)>
    where
        F: FnOnce(&mut Vec<Profile>) -> CoreResult<T>,
    {
        let _guard = self.guard();
        let mut profiles = self.load_locked()?;
        let value = edit(&mut profiles)?;
        self.save_locked(&profiles)?;
        Ok((value, profiles))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_locked(&self) -> CoreResult<Vec<Profile>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let defaults = default_profiles();
                info!(path = %self.path.display(), "No profile store found, writing defaults");
                self.write_locked(&defaults)?;
                return Ok(defaults);
            }
            Err(e) => return Err(self.persistence_error(&e)),
        };

        let text = String::from_utf8(bytes).map_err(|e| self.corrupt(e.to_string()))?;
        let profiles: Vec<Profile> =
            serde_json::from_str(&text).map_err(|e| self.corrupt(e.to_string()))?;

        if let Some(name) = duplicate_name(&profiles) {
            return Err(self.corrupt(format!("duplicate profile name '{name}'")));
        }

        Ok(profiles)
    }

    fn save_locked(&self, profiles: &[Profile]) -> CoreResult<()> {
        if profiles.is_empty() {
            return Err(CoreError::Validation(
                "Refusing to save an empty profile set".into(),
            ));
        }
        if let Some(name) = duplicate_name(profiles) {
            return Err(CoreError::Validation(format!(
                "Profile names must be unique: '{name}' appears more than once"
            )));
        }

        self.write_locked(profiles)?;
        info!(path = %self.path.display(), count = profiles.len(), "Saved profiles");
        Ok(())
    }

    /// Write through a temp file in the same directory, then rename over
    /// the target so readers never observe a partial file
    fn write_locked(&self, profiles: &[Profile]) -> CoreResult<()> {
        let mut json = serde_json::to_string_pretty(profiles)
            .map_err(|e| self.persistence_message(e.to_string()))?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.persistence_error(&e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.persistence_error(&e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| self.persistence_error(&e))?;
        tmp.persist(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e.error, "Failed to replace profile store");
            self.persistence_error(&e.error)
        })?;

        Ok(())
    }

    fn corrupt(&self, message: String) -> CoreError {
        warn!(path = %self.path.display(), %message, "Profile store is corrupt");
        CoreError::CorruptStore {
            path: self.path.clone(),
            message,
        }
    }

    fn persistence_error(&self, err: &io::Error) -> CoreError {
        self.persistence_message(err.to_string())
    }

    fn persistence_message(&self, message: String) -> CoreError {
        CoreError::Persistence {
            path: self.path.clone(),
            message,
        }
    }
}
