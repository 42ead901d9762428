// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use regsync_domain::{LocationLevel, UserRecord};

use super::{granted, profile, test_db, unprivileged, username};

#[test]
fn creates_are_visible_after_commit() {
    let mut db = test_db();
    let creates = vec![unprivileged("alice"), unprivileged("bob")];

    let written = db
        .apply_upsert_batch(&creates, &[], &[])
        .expect("batch should commit");

    assert_eq!(written, 2);
    let stored = db
        .users_by_usernames(&["alice".to_string(), "bob".to_string()])
        .expect("lookup should succeed");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| !r.is_allowed));
}

#[test]
fn profile_update_preserves_permission_state() {
    let mut db = test_db();
    db.apply_upsert_batch(&[granted("alice", "1,2", "10")], &[], &[])
        .expect("seed should commit");

    let updated_profile = profile("alice@new.example.com", Some("Network"));
    db.apply_upsert_batch(&[], &[(username("alice"), updated_profile)], &[])
        .expect("update should commit");

    let stored = db
        .users_by_usernames(&["alice".to_string()])
        .expect("lookup should succeed");
    let record = &stored[0];
    assert_eq!(record.profile.email, "alice@new.example.com");
    assert_eq!(record.profile.department.as_deref(), Some("Network"));
    assert!(record.is_allowed);
    assert_eq!(record.agent_permission, "1,2");
    assert_eq!(
        record.location.value_for(LocationLevel::Province),
        Some("HNI")
    );
    assert_eq!(record.approved_at.as_deref(), Some("2026-08-29T00:00:00Z"));
}

#[test]
fn deletes_remove_only_named_users() {
    let mut db = test_db();
    db.apply_upsert_batch(
        &[unprivileged("alice"), unprivileged("bob"), unprivileged("carol")],
        &[],
        &[],
    )
    .expect("seed should commit");

    db.apply_upsert_batch(&[], &[], &[username("bob")])
        .expect("delete should commit");

    let remaining = db.all_usernames().expect("listing should succeed");
    assert_eq!(
        remaining.into_iter().collect::<Vec<_>>(),
        vec!["alice".to_string(), "carol".to_string()]
    );
}

#[test]
fn mixed_batch_applies_all_three_phases() {
    let mut db = test_db();
    db.apply_upsert_batch(&[unprivileged("alice"), unprivileged("bob")], &[], &[])
        .expect("seed should commit");

    let written = db
        .apply_upsert_batch(
            &[unprivileged("dave")],
            &[(username("alice"), profile("alice@moved.example.com", None))],
            &[username("bob")],
        )
        .expect("mixed batch should commit");

    assert_eq!(written, 2);
    let all = db.all_usernames().expect("listing should succeed");
    assert!(all.contains("alice"));
    assert!(all.contains("dave"));
    assert!(!all.contains("bob"));
}

#[test]
fn duplicate_create_rolls_back_whole_batch() {
    let mut db = test_db();
    db.apply_upsert_batch(&[unprivileged("alice")], &[], &[])
        .expect("seed should commit");

    // "alice" already exists, so the insert phase violates the primary key.
    let result = db.apply_upsert_batch(&[unprivileged("bob"), unprivileged("alice")], &[], &[]);
    assert!(result.is_err());

    let all = db.all_usernames().expect("listing should succeed");
    assert!(!all.contains("bob"), "failed batch must not leave partial writes");
}

#[test]
fn update_of_missing_user_rolls_back_creates() {
    let mut db = test_db();

    let result = db.apply_upsert_batch(
        &[unprivileged("alice")],
        &[(username("ghost"), profile("ghost@example.com", None))],
        &[],
    );
    assert!(result.is_err());

    let all = db.all_usernames().expect("listing should succeed");
    assert!(all.is_empty(), "create phase must roll back with the failed update");
}

#[test]
fn new_records_persist_full_permission_state() {
    let mut db = test_db();
    let mut record = granted("alice", "1", "10,20");
    record.station_default = Some("GLI0194".to_string());

    db.apply_upsert_batch(std::slice::from_ref(&record), &[], &[])
        .expect("batch should commit");

    let stored = db
        .users_by_usernames(&["alice".to_string()])
        .expect("lookup should succeed");
    let stored: &UserRecord = &stored[0];
    assert!(stored.is_allowed);
    assert_eq!(stored.field_permission, "10,20");
    assert_eq!(stored.station_default.as_deref(), Some("GLI0194"));
    assert_eq!(stored.location.active(), Some((LocationLevel::Province, "HNI")));
}
