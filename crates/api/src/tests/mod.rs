// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared test helpers. Each test runs against its own in-memory
//! database seeded with a small reference universe.

use regsync_domain::LocationLevel;
use regsync_persistence::SqlitePersistence;

use crate::request_response::{BulkUpsertRequest, SnapshotUser};

mod permission_tests;
mod station_tests;

pub(crate) fn seeded_db() -> SqlitePersistence {
    let mut db = SqlitePersistence::new_in_memory().expect("in-memory database");
    db.insert_agent(1, "Agent One").expect("agent seed");
    db.insert_agent(2, "Agent Two").expect("agent seed");
    db.insert_field(10, "Field Ten").expect("field seed");
    db.insert_field(20, "Field Twenty").expect("field seed");
    db.insert_location_code(LocationLevel::Nation, "VN", Some("Vietnam"))
        .expect("nation seed");
    db.insert_location_code(LocationLevel::Area, "A1", Some("Area One"))
        .expect("area seed");
    db.insert_location_code(LocationLevel::Province, "HNI", Some("Ha Noi"))
        .expect("province seed");
    db.insert_location_code(LocationLevel::Province, "HCM", Some("Ho Chi Minh"))
        .expect("province seed");
    db.insert_location_code(LocationLevel::District, "D01", Some("District One"))
        .expect("district seed");
    db.insert_location_code(LocationLevel::MainStation, "MS1", Some("Main One"))
        .expect("main station seed");
    db.insert_location_code(LocationLevel::Station, "GLI0100", None)
        .expect("station seed");
    db
}

pub(crate) fn snapshot_user(email: &str) -> SnapshotUser {
    SnapshotUser {
        email: email.to_string(),
        employee_id: Some("E-100".to_string()),
        fullname: Some("Test User".to_string()),
        department: Some("Network Operations".to_string()),
        position: None,
        phone_number: None,
        birth_year: Some("1990".to_string()),
    }
}

pub(crate) fn snapshot(emails: &[&str]) -> BulkUpsertRequest {
    BulkUpsertRequest {
        data: emails.iter().map(|e| snapshot_user(e)).collect(),
        delete_non_exist_people: false,
    }
}
