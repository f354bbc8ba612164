// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Brickworks hosts: where snap preferences
//! live and how they are read back. Engine adapters stay thin; storage is
//! reached through [`store::PrefsStore`].

pub mod prefs;
pub mod store;

pub use prefs::{PrefsError, SnapPrefs, SnapPrefsService, SNAP_PREFS_KEY};
pub use store::{PrefsStore, StoreError};
