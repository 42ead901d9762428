// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared test helpers. Every test gets its own in-memory database.

use regsync_domain::{LocationLevel, LocationPermission, UserProfile, UserRecord, Username};

use crate::Persistence;

mod station_tests;
mod upsert_tests;

pub(crate) fn test_db() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub(crate) fn username(value: &str) -> Username {
    Username::new(value).expect("test username should be valid")
}

pub(crate) fn profile(email: &str, department: Option<&str>) -> UserProfile {
    UserProfile {
        email: email.to_string(),
        employee_id: Some("E-100".to_string()),
        fullname: Some("Test User".to_string()),
        department: department.map(str::to_string),
        position: None,
        phone_number: None,
        birth_year: Some("1990".to_string()),
    }
}

pub(crate) fn unprivileged(name: &str) -> UserRecord {
    UserRecord::new_unprivileged(username(name), profile(&format!("{name}@example.com"), None))
}

pub(crate) fn granted(name: &str, agents: &str, fields: &str) -> UserRecord {
    let mut record = unprivileged(name);
    record.is_allowed = true;
    record.agent_permission = agents.to_string();
    record.field_permission = fields.to_string();
    record.approved_at = Some("2026-08-29T00:00:00Z".to_string());
    record.location = LocationPermission::with_level(LocationLevel::Province, "HNI");
    record
}

/// Seeds a small reference universe: two agents, two fields, one code at
/// every location level.
pub(crate) fn seed_references(db: &mut Persistence) {
    db.insert_agent(1, "Agent One").expect("agent insert");
    db.insert_agent(2, "Agent Two").expect("agent insert");
    db.insert_field(10, "Field Ten").expect("field insert");
    db.insert_field(20, "Field Twenty").expect("field insert");
    db.insert_location_code(LocationLevel::Nation, "VN", Some("Vietnam"))
        .expect("nation insert");
    db.insert_location_code(LocationLevel::Area, "A1", Some("Area One"))
        .expect("area insert");
    db.insert_location_code(LocationLevel::Province, "HNI", Some("Ha Noi"))
        .expect("province insert");
    db.insert_location_code(LocationLevel::District, "D01", Some("District One"))
        .expect("district insert");
    db.insert_location_code(LocationLevel::MainStation, "MS1", Some("Main One"))
        .expect("main station insert");
    db.insert_location_code(LocationLevel::Station, "GLI0194", None)
        .expect("station insert");
}
