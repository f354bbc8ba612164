// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory prefs store for testing without filesystem I/O.

use brick_app_core::store::{check_key, PrefsStore, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// [`PrefsStore`] kept in a map.
///
/// Clones share state, so a test can keep one handle for inspection while a
/// `SnapPrefsService` owns another. Reads and writes are counted, and either
/// can be made to fail.
#[derive(Clone, Default)]
pub struct InMemoryPrefsStore {
    inner: Arc<Mutex<Shelf>>,
}

#[derive(Default)]
struct Shelf {
    docs: HashMap<String, Vec<u8>>,
    reads: usize,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl InMemoryPrefsStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn shelf<R>(&self, f: impl FnOnce(&mut Shelf) -> R) -> R {
        let mut shelf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut shelf)
    }

    /// Makes every later read fail with [`StoreError::Unavailable`].
    pub fn fail_reads(&self, fail: bool) {
        self.shelf(|s| s.fail_reads = fail);
    }

    /// Makes every later write fail with [`StoreError::Unavailable`].
    pub fn fail_writes(&self, fail: bool) {
        self.shelf(|s| s.fail_writes = fail);
    }

    /// Read attempts so far, failed ones included.
    pub fn reads(&self) -> usize {
        self.shelf(|s| s.reads)
    }

    /// Write attempts so far, failed ones included.
    pub fn writes(&self) -> usize {
        self.shelf(|s| s.writes)
    }

    /// Raw document under `key`, bypassing the counters.
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.shelf(|s| s.docs.get(key).cloned())
    }

    /// Seeds a document without counting a write.
    pub fn seed(&self, key: &str, bytes: &[u8]) {
        self.shelf(|s| {
            s.docs.insert(key.to_owned(), bytes.to_vec());
        });
    }
}

impl PrefsStore for InMemoryPrefsStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        check_key(key)?;
        self.shelf(|s| {
            s.reads += 1;
            if s.fail_reads {
                return Err(StoreError::Unavailable("in-memory reads disabled".into()));
            }
            Ok(s.docs.get(key).cloned())
        })
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        check_key(key)?;
        self.shelf(|s| {
            s.writes += 1;
            if s.fail_writes {
                return Err(StoreError::Unavailable("in-memory writes disabled".into()));
            }
            s.docs.insert(key.to_owned(), bytes.to_vec());
            Ok(())
        })
    }
}
