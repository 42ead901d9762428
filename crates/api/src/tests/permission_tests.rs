// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::handlers::{get_users, update_users, upsert_users};
use crate::request_response::{
    ListUsersQuery, LocationSelection, PermissionUpdate, PermissionUpdateRequest,
};

use super::{seeded_db, snapshot};

fn grant(username: &str, agents: &[&str], fields: &[&str], level: &str, value: &str) -> PermissionUpdate {
    PermissionUpdate {
        username: username.to_string(),
        is_allowed: true,
        agent: Some(agents.iter().map(|a| (*a).to_string()).collect()),
        field: Some(fields.iter().map(|c| (*c).to_string()).collect()),
        location_permission: Some(LocationSelection {
            level: level.to_string(),
            value: value.to_string(),
        }),
    }
}

fn revoke(username: &str) -> PermissionUpdate {
    PermissionUpdate {
        username: username.to_string(),
        is_allowed: false,
        agent: None,
        field: None,
        location_permission: None,
    }
}

fn request(updates: Vec<PermissionUpdate>) -> PermissionUpdateRequest {
    PermissionUpdateRequest { data: updates }
}

#[test]
fn grant_sets_permissions_and_location() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let response = update_users(
        &mut db,
        &request(vec![grant("alice", &["1", "2"], &["10"], "province", "HNI,HCM")]),
    )
    .expect("grant should apply");
    assert_eq!(response.message, "Successfully updated permissions for 1 users");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    let user = &page.content[0];
    assert!(user.is_allowed);
    assert_eq!(user.agent_permission, "1,2");
    assert_eq!(user.field_permission, "10");
    assert!(user.approved_at.is_some());
    assert_eq!(user.location_permission.province.as_deref(), Some("HNI,HCM"));
    assert!(user.location_permission.nation.is_none());
}

#[test]
fn grant_at_new_level_clears_previous_level() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");
    update_users(
        &mut db,
        &request(vec![grant("alice", &["1"], &["10"], "province", "HNI")]),
    )
    .expect("first grant");

    update_users(
        &mut db,
        &request(vec![grant("alice", &["1"], &["10"], "district", "D01")]),
    )
    .expect("second grant");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    let location = &page.content[0].location_permission;
    assert!(location.province.is_none());
    assert_eq!(location.district.as_deref(), Some("D01"));
}

#[test]
fn revoke_clears_permission_state() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");
    update_users(
        &mut db,
        &request(vec![grant("alice", &["1"], &["10"], "nation", "VN")]),
    )
    .expect("grant");

    update_users(&mut db, &request(vec![revoke("alice")])).expect("revoke should apply");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    let user = &page.content[0];
    assert!(!user.is_allowed);
    assert_eq!(user.agent_permission, "");
    assert!(user.approved_at.is_none());
    assert!(user.location_permission.nation.is_none());
}

#[test]
fn empty_update_batch_is_rejected() {
    let mut db = seeded_db();
    let error = update_users(&mut db, &request(vec![])).expect_err("empty batch must fail");
    assert_eq!(error.code(), "INVALID_REQUEST");
}

#[test]
fn non_numeric_agent_code_is_rejected() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![grant("alice", &["abc"], &["10"], "nation", "VN")]),
    )
    .expect_err("non-numeric agent must fail");
    assert_eq!(error.code(), "INVALID_AGENT");
    assert_eq!(error.to_string(), "Agent code abc is not a valid number");
}

#[test]
fn unknown_agent_code_is_rejected() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![grant("alice", &["99"], &["10"], "nation", "VN")]),
    )
    .expect_err("unknown agent must fail");
    assert_eq!(error.code(), "INVALID_AGENT");
    assert_eq!(error.to_string(), "Agent code 99 does not exist");
}

#[test]
fn one_bad_agent_code_aborts_the_whole_batch() {
    let mut db = seeded_db();
    upsert_users(
        &mut db,
        &snapshot(&["alice@corp.example", "bob@corp.example", "carol@corp.example", "dave@corp.example"]),
    )
    .expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![
            grant("alice", &["1"], &["10"], "nation", "VN"),
            grant("bob", &["1"], &["10"], "nation", "VN"),
            grant("carol", &["1"], &["10"], "nation", "VN"),
            grant("dave", &["99"], &["10"], "nation", "VN"),
        ]),
    )
    .expect_err("unknown agent must fail");
    assert_eq!(error.code(), "INVALID_AGENT");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    assert!(
        page.content.iter().all(|user| !user.is_allowed),
        "no user in a failed batch may be updated"
    );
}

#[test]
fn unknown_field_code_is_rejected() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![grant("alice", &["1"], &["77"], "nation", "VN")]),
    )
    .expect_err("unknown field must fail");
    assert_eq!(error.code(), "INVALID_FIELD");
}

#[test]
fn unknown_location_level_is_rejected() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![grant("alice", &["1"], &["10"], "galaxy", "VN")]),
    )
    .expect_err("unknown level must fail");
    assert_eq!(error.code(), "INVALID_LEVEL");
}

#[test]
fn unknown_location_code_maps_to_level_specific_code() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![grant("alice", &["1"], &["10"], "province", "XXX")]),
    )
    .expect_err("unknown province must fail");
    assert_eq!(error.code(), "INVALID_PROVINCE");
    assert_eq!(error.to_string(), "Province code XXX does not exist");
}

#[test]
fn grant_without_location_is_rejected() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let mut update = grant("alice", &["1"], &["10"], "nation", "VN");
    update.location_permission = None;
    let error =
        update_users(&mut db, &request(vec![update])).expect_err("missing location must fail");
    assert_eq!(error.code(), "INVALID_LOCATION");
}

#[test]
fn unknown_user_is_rejected_before_any_write() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![
            grant("alice", &["1"], &["10"], "nation", "VN"),
            grant("ghost", &["1"], &["10"], "nation", "VN"),
        ]),
    )
    .expect_err("unknown user must fail");
    assert_eq!(error.code(), "USER_NOT_FOUND");
    assert_eq!(error.to_string(), "User ghost not found");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    assert!(!page.content[0].is_allowed, "failed batch must not apply partially");
}

#[test]
fn unknown_user_is_reported_before_unknown_reference_codes() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let error = update_users(
        &mut db,
        &request(vec![
            grant("alice", &["99"], &["10"], "nation", "VN"),
            grant("ghost", &["1"], &["10"], "nation", "VN"),
        ]),
    )
    .expect_err("unknown user must fail first");
    assert_eq!(error.code(), "USER_NOT_FOUND");
    assert_eq!(error.to_string(), "User ghost not found");
}

#[test]
fn dropped_earlier_duplicate_is_not_shape_validated() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    let mut malformed = grant("alice", &["1"], &["10"], "nation", "VN");
    malformed.agent = None;
    let response = update_users(&mut db, &request(vec![malformed, revoke("alice")]))
        .expect("only the surviving occurrence should be validated");
    assert_eq!(response.message, "Successfully updated permissions for 1 users");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    assert!(!page.content[0].is_allowed);
}

#[test]
fn duplicate_usernames_in_update_resolve_last_wins() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["alice@corp.example"])).expect("seed snapshot");

    update_users(
        &mut db,
        &request(vec![
            grant("alice", &["1"], &["10"], "nation", "VN"),
            revoke("alice"),
        ]),
    )
    .expect("update should apply");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    assert!(!page.content[0].is_allowed);
}
