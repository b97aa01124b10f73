// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::CachedRoom;
use sable_core::DeviceId;
use tempfile::tempdir;

fn populated(paths: &StorePaths) -> StoreHandles {
    let handles = open_store_pair(paths).unwrap();
    handles.general.put_room(CachedRoom::new("!a:hs")).unwrap();
    handles
        .crypto
        .load_or_generate_keys(&DeviceId::new("DEV"))
        .unwrap();
    handles
}

#[test]
fn standard_layout() {
    let paths = StorePaths::under("/state");
    assert_eq!(paths.general, PathBuf::from("/state/web-sync-store"));
    assert_eq!(paths.crypto, PathBuf::from("/state/crypto-store"));
}

#[yare::parameterized(
    all          = { ClearScope::All, false },
    general_only = { ClearScope::GeneralOnly, true },
)]
fn clear_without_handles(scope: ClearScope, crypto_survives: bool) {
    let dir = tempdir().unwrap();
    let paths = StorePaths::under(dir.path());
    drop(populated(&paths));

    clear_store_pair(&paths, scope).unwrap();

    let reopened = open_store_pair(&paths).unwrap();
    assert!(reopened.general.is_empty());
    assert_eq!(reopened.crypto.device_keys().is_some(), crypto_survives);
}

#[yare::parameterized(
    all          = { ClearScope::All, false },
    general_only = { ClearScope::GeneralOnly, true },
)]
fn clear_through_handles(scope: ClearScope, crypto_survives: bool) {
    let dir = tempdir().unwrap();
    let paths = StorePaths::under(dir.path());
    let handles = populated(&paths);

    handles.clear(scope).unwrap();

    assert!(handles.general.is_empty());
    assert_eq!(handles.crypto.device_keys().is_some(), crypto_survives);
}

#[test]
fn clearing_missing_stores_succeeds() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::under(dir.path().join("never-created"));
    clear_store_pair(&paths, ClearScope::All).unwrap();
}
