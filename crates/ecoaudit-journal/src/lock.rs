//! Advisory lock serializing writers of one journal across processes.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::errors::JournalError;

/// Exclusive lock on `<journal>.lock`, released on drop.
///
/// Everything a writer does between reading the current state and
/// persisting the next one should happen while this is held.
#[derive(Debug)]
pub struct JournalLock {
    file: File,
    path: PathBuf,
}

impl JournalLock {
    /// Lock file used for `journal`.
    pub fn lock_path(journal: &Path) -> PathBuf {
        let mut name = journal
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".lock");
        journal.with_file_name(name)
    }

    /// Blocks until the lock for `journal` is held.
    pub fn acquire(journal: &Path) -> Result<Self, JournalError> {
        let (file, path) = Self::open(journal)?;
        file.lock_exclusive()
            .map_err(|source| JournalError::Locked {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "journal lock acquired");
        Ok(Self { file, path })
    }

    /// Takes the lock for `journal` or fails with [`JournalError::Locked`].
    pub fn try_acquire(journal: &Path) -> Result<Self, JournalError> {
        let (file, path) = Self::open(journal)?;
        file.try_lock_exclusive()
            .map_err(|source| JournalError::Locked {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "journal lock acquired");
        Ok(Self { file, path })
    }

    /// Path of the held lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(journal: &Path) -> Result<(File, PathBuf), JournalError> {
        let path = Self::lock_path(journal);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        Ok((file, path))
    }
}

impl Drop for JournalLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_file_sits_next_to_journal() {
        assert_eq!(
            JournalLock::lock_path(Path::new("/var/eco/pool-audit.ecj")),
            PathBuf::from("/var/eco/pool-audit.ecj.lock")
        );
    }

    #[test]
    fn second_holder_is_refused_until_release() {
        let temp = TempDir::new().unwrap();
        let journal = temp.path().join("pool-audit.ecj");

        let held = JournalLock::acquire(&journal).unwrap();
        assert!(held.path().exists());
        assert!(matches!(
            JournalLock::try_acquire(&journal),
            Err(JournalError::Locked { .. })
        ));

        drop(held);
        assert!(JournalLock::try_acquire(&journal).is_ok());
    }
}
