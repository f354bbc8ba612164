// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use brick_app_core::{PrefsError, PrefsStore, SnapPrefsService, StoreError};
use brick_config_fs::FsPrefsStore;

#[test]
fn documents_land_as_json_files_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsPrefsStore::in_dir(dir.path().join("nested")).unwrap();
    store.write("snap", b"{}").unwrap();
    store.write("snap", b"{ }").unwrap();

    let names: Vec<_> = std::fs::read_dir(store.dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["snap.json".to_string()]);
    assert_eq!(store.read("snap").unwrap().as_deref(), Some(&b"{ }"[..]));
}

#[test]
fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsPrefsStore::in_dir(dir.path()).unwrap();
    assert!(store.read("absent").unwrap().is_none());
}

#[test]
fn path_like_keys_never_touch_the_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsPrefsStore::in_dir(dir.path()).unwrap();
    for key in ["", "../escape", "a/b", ".hidden"] {
        assert!(matches!(store.write(key, b"x"), Err(StoreError::BadKey(_))));
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn snap_prefs_survive_a_new_store() {
    let dir = tempfile::tempdir().unwrap();
    let service = SnapPrefsService::new(FsPrefsStore::in_dir(dir.path()).unwrap());
    let saved = service
        .update(|p| {
            p.snap.instant_snap_enabled = true;
            p.snap.haptics.strength = 0.25;
        })
        .unwrap();

    let reopened = SnapPrefsService::new(FsPrefsStore::in_dir(dir.path()).unwrap());
    assert_eq!(reopened.load().unwrap(), saved);
    assert!(reopened.snap_system().unwrap().default_config().instant_snap_enabled);
}

#[test]
fn hand_edited_garbage_names_the_file_key() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("snap.json"), "{ snap: nope").unwrap();
    let service = SnapPrefsService::new(FsPrefsStore::in_dir(dir.path()).unwrap());
    let err = service.load().unwrap_err();
    assert!(matches!(err, PrefsError::Malformed { .. }));
    assert_eq!(err.key(), "snap");
}
