// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{test_db, unprivileged};

#[test]
fn insert_station_if_missing_is_idempotent() {
    let mut db = test_db();

    assert!(db
        .insert_station_if_missing("GLI0194")
        .expect("first insert should succeed"));
    assert!(!db
        .insert_station_if_missing("GLI0194")
        .expect("repeat insert should be a no-op"));
}

#[test]
fn set_station_default_updates_known_user() {
    let mut db = test_db();
    db.apply_upsert_batch(&[unprivileged("hienlt11")], &[], &[])
        .expect("seed should commit");

    assert!(db
        .set_station_default("hienlt11", "GLI0194")
        .expect("update should succeed"));

    let stored = db
        .users_by_usernames(&["hienlt11".to_string()])
        .expect("lookup should succeed");
    assert_eq!(stored[0].station_default.as_deref(), Some("GLI0194"));
}

#[test]
fn set_station_default_skips_unknown_user() {
    let mut db = test_db();

    assert!(!db
        .set_station_default("ghost", "GLI0194")
        .expect("unknown user is a skip, not an error"));
}

#[test]
fn foreign_keys_are_enforced() {
    let mut db = test_db();
    db.verify_foreign_key_enforcement()
        .expect("foreign keys should be enabled on every connection");
}
