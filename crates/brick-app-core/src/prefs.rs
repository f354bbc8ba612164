// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted snap preferences.

use brick_snap::{ConfigValidationError, SnapConfig, SnapError, SnapSystem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{PrefsStore, StoreError};

/// Key snap prefs are stored under.
pub const SNAP_PREFS_KEY: &str = "snap";

/// Saved preferences for the snap system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SnapPrefs {
    /// Default config handed to every plug.
    pub snap: SnapConfig,
}

/// Why snap prefs could not be loaded or saved. Every variant names the
/// document key involved.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The store failed.
    #[error("snap prefs {key:?}: {source}")]
    Store {
        /// Document key.
        key: String,
        /// Adapter failure.
        #[source]
        source: StoreError,
    },
    /// Stored bytes are not a snap prefs document.
    #[error("snap prefs {key:?} is malformed: {source}")]
    Malformed {
        /// Document key.
        key: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// Document parsed but holds out-of-range values.
    #[error("snap prefs {key:?} rejected: {source}")]
    Invalid {
        /// Document key.
        key: String,
        /// First offending value.
        #[source]
        source: ConfigValidationError,
    },
    /// The snap system refused the stored config.
    #[error("snap prefs {key:?} not usable: {source}")]
    System {
        /// Document key.
        key: String,
        /// Snap system failure.
        #[source]
        source: SnapError,
    },
}

impl PrefsError {
    /// Document key the failure refers to.
    pub fn key(&self) -> &str {
        match self {
            Self::Store { key, .. }
            | Self::Malformed { key, .. }
            | Self::Invalid { key, .. }
            | Self::System { key, .. } => key,
        }
    }
}

/// Loads and saves [`SnapPrefs`] through a [`PrefsStore`].
///
/// Nothing invalid is ever written, and nothing invalid is ever returned.
#[derive(Debug, Clone)]
pub struct SnapPrefsService<S> {
    store: S,
    key: String,
}

impl<S: PrefsStore> SnapPrefsService<S> {
    /// Service using [`SNAP_PREFS_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, SNAP_PREFS_KEY)
    }

    /// Service keeping its document under `key` (per-profile prefs).
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Document key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current prefs; defaults when nothing (or an empty file) is stored.
    pub fn load(&self) -> Result<SnapPrefs, PrefsError> {
        let bytes = self.store.read(&self.key).map_err(|source| self.store_err(source))?;
        let prefs = match bytes {
            Some(bytes) if !bytes.is_empty() => {
                serde_json::from_slice(&bytes).map_err(|source| PrefsError::Malformed {
                    key: self.key.clone(),
                    source,
                })?
            }
            _ => SnapPrefs::default(),
        };
        self.check(&prefs)?;
        Ok(prefs)
    }

    /// Validates, then writes pretty JSON.
    pub fn save(&self, prefs: &SnapPrefs) -> Result<(), PrefsError> {
        self.check(prefs)?;
        let bytes = serde_json::to_vec_pretty(prefs).map_err(|source| PrefsError::Malformed {
            key: self.key.clone(),
            source,
        })?;
        self.store
            .write(&self.key, &bytes)
            .map_err(|source| self.store_err(source))
    }

    /// Load, edit, save. The edit is discarded if the result is invalid.
    pub fn update(&self, edit: impl FnOnce(&mut SnapPrefs)) -> Result<SnapPrefs, PrefsError> {
        let mut prefs = self.load()?;
        edit(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }

    /// Snap system whose plugs default to the stored config.
    pub fn snap_system(&self) -> Result<SnapSystem, PrefsError> {
        let prefs = self.load()?;
        SnapSystem::new(prefs.snap).map_err(|source| PrefsError::System {
            key: self.key.clone(),
            source,
        })
    }

    fn check(&self, prefs: &SnapPrefs) -> Result<(), PrefsError> {
        prefs.snap.validate().map_err(|source| PrefsError::Invalid {
            key: self.key.clone(),
            source,
        })
    }

    fn store_err(&self, source: StoreError) -> PrefsError {
        PrefsError::Store {
            key: self.key.clone(),
            source,
        }
    }
}
