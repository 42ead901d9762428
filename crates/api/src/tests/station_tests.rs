// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{get_station, get_users, sync_stations, upsert_users};
use crate::request_response::ListUsersQuery;

use super::{seeded_db, snapshot};

#[test]
fn known_station_is_returned() {
    let mut db = seeded_db();

    let response = get_station(&mut db, "GLI0100").expect("lookup should succeed");
    assert_eq!(response.code, "GLI0100");
}

#[test]
fn unknown_station_is_a_lookup_miss_not_a_validation_failure() {
    let mut db = seeded_db();

    let error = get_station(&mut db, "GLI9999").expect_err("unknown station must fail");
    assert!(matches!(error, ApiError::StationNotFound { .. }));
    assert_eq!(error.code(), "INVALID_STATION");
    assert_eq!(error.to_string(), "Station code GLI9999 does not exist");
}

#[test]
fn sync_inserts_feed_stations() {
    let mut db = seeded_db();

    let response = sync_stations(&mut db).expect("sync should succeed");
    assert_eq!(response.message, "Station sync triggered successfully");

    for code in ["GLI0194", "GLI0193-13", "GLI0195"] {
        let found = get_station(&mut db, code).expect("feed station should be stored");
        assert_eq!(found.code, code);
    }
}

#[test]
fn sync_sets_default_station_for_known_user() {
    let mut db = seeded_db();
    upsert_users(&mut db, &snapshot(&["hienlt11@viettel.com.vn"])).expect("seed snapshot");

    sync_stations(&mut db).expect("sync should succeed");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    let user = &page.content[0];
    assert_eq!(user.username, "hienlt11");
    // The feed lists three stations for this user; the last one wins.
    assert_eq!(
        user.location_permission.station_default.as_deref(),
        Some("GLI0195")
    );
    assert!(!user.is_allowed, "sync must not touch permission state");
}

#[test]
fn sync_without_matching_users_still_succeeds() {
    let mut db = seeded_db();

    let response = sync_stations(&mut db).expect("sync should succeed");
    assert_eq!(response.message, "Station sync triggered successfully");

    let page = get_users(&mut db, &ListUsersQuery::default()).expect("listing should succeed");
    assert_eq!(page.total_elements, 0);
}
