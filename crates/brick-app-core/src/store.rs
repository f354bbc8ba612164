// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Storage port for preference documents.

use thiserror::Error;

/// Byte storage keyed by logical document name (`"snap"`, ...).
///
/// Adapters decide where bytes live; they never parse them.
pub trait PrefsStore {
    /// Bytes stored under `key`, or `None` when nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    /// Replaces whatever is stored under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Failure inside a [`PrefsStore`] adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem or OS failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// Key cannot name a document (empty, path-like, hidden).
    #[error("{0:?} is not a valid prefs key")]
    BadKey(String),
    /// The backing storage could not be reached at all.
    #[error("prefs storage unavailable: {0}")]
    Unavailable(String),
}

/// Keys are bare names: no separators, no leading dot, not empty.
pub fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
        return Err(StoreError::BadKey(key.to_owned()));
    }
    Ok(())
}
