// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem [`PrefsStore`] for Brickworks hosts.
//!
//! Each document is one `<key>.json` file in a single directory, by default
//! the platform config dir (`~/.config/Brickworks` on Linux). Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-save
//! leaves the previous prefs readable.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use brick_app_core::store::{check_key, PrefsStore, StoreError};
use directories::ProjectDirs;

/// Prefs documents as JSON files under one directory.
#[derive(Debug, Clone)]
pub struct FsPrefsStore {
    dir: PathBuf,
}

impl FsPrefsStore {
    /// Store in the user's platform config directory.
    pub fn user() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("dev", "brickworks", "Brickworks").ok_or_else(|| {
            StoreError::Unavailable("no home directory to place Brickworks prefs in".into())
        })?;
        Self::in_dir(dirs.config_dir())
    }

    /// Store in `dir`, creating it when missing.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory documents live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn file_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PrefsStore for FsPrefsStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.file_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let target = self.file_for(key)?;
        let staging = target.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&staging, &target)?;
        Ok(())
    }
}
