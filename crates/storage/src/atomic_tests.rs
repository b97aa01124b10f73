// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn write_atomic_creates_parents_and_leaves_no_tmp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("doc.json");

    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"second");
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn remove_helpers_tolerate_missing_targets() {
    let dir = tempdir().unwrap();
    remove_if_exists(&dir.path().join("missing")).unwrap();
    remove_dir_if_exists(&dir.path().join("missing-dir")).unwrap();
}

#[test]
fn bak_rotation_keeps_three_backups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    for generation in 0..4 {
        let bak = rotate_bak_path(&path);
        fs::write(&bak, format!("gen-{generation}")).unwrap();
    }

    assert_eq!(fs::read_to_string(path.with_extension("bak")).unwrap(), "gen-3");
    assert_eq!(fs::read_to_string(path.with_extension("bak.2")).unwrap(), "gen-2");
    assert_eq!(fs::read_to_string(path.with_extension("bak.3")).unwrap(), "gen-1");
    assert!(!path.with_extension("bak.4").exists());
}
