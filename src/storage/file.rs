//! File-backed key-value store: one `<key>.json` file per key.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::traits::KeyValueStore;
use crate::error::{Result, TaskError};

/// Key-value store rooted at a directory.
///
/// Values are written to a temporary sibling and renamed into place, so a
/// reader never sees a half-written file.
#[derive(Debug)]
pub struct FileKvStore {
    base_path: PathBuf,
}

impl FileKvStore {
    /// Create a new FileKvStore at the given directory, creating it if needed.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            TaskError::Persistence(format!("Failed to create {}: {}", base_path.display(), e))
        })?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TaskError::Validation(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TaskError::Persistence(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let tmp_path = path.with_extension("json.tmp");

        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };

        if let Err(e) = write() {
            match fs::remove_file(&tmp_path) {
                Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                    warn!("Failed to remove {}: {}", tmp_path.display(), cleanup);
                }
                _ => {}
            }
            return Err(TaskError::Persistence(format!("Failed to write {}: {}", path.display(), e)));
        }
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TaskError::Persistence(format!("Failed to remove {}: {}", path.display(), e))),
        }
    }
}
