// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::location::{LocationLevel, LocationPermission};
use std::str::FromStr;

#[test]
fn test_level_parse_is_case_insensitive() {
    assert_eq!(
        LocationLevel::from_str("NATION").expect("Should parse"),
        LocationLevel::Nation
    );
    assert_eq!(
        LocationLevel::from_str("Main_Station").expect("Should parse"),
        LocationLevel::MainStation
    );
    assert_eq!(
        LocationLevel::from_str("station").expect("Should parse"),
        LocationLevel::Station
    );
}

#[test]
fn test_level_parse_rejects_unknown_name() {
    let err = LocationLevel::from_str("continent").expect_err("Unknown level must fail");
    assert_eq!(err, DomainError::InvalidLocationLevel("continent".to_string()));
}

#[test]
fn test_level_round_trips_through_as_str() {
    for level in LocationLevel::ALL {
        let parsed = LocationLevel::from_str(level.as_str()).expect("Should parse own name");
        assert_eq!(parsed, level);
    }
}

#[test]
fn test_cleared_permission_has_no_active_level() {
    let permission = LocationPermission::cleared();
    assert!(permission.is_clear());
    assert!(permission.active().is_none());
    assert_eq!(permission.active_level_count(), 0);
}

#[test]
fn test_with_level_sets_exactly_one_field() {
    for level in LocationLevel::ALL {
        let permission = LocationPermission::with_level(level, "CODE1");
        assert_eq!(permission.active_level_count(), 1, "level {level} leaked");
        assert_eq!(permission.active(), Some((level, "CODE1")));
        assert_eq!(permission.value_for(level), Some("CODE1"));
    }
}

#[test]
fn test_with_level_clears_previously_active_level() {
    // Simulates a user moving from province-level to station-level access.
    // The replacement write must not leave the province value stale.
    let previous = LocationPermission::with_level(LocationLevel::Province, "P01");
    assert_eq!(previous.value_for(LocationLevel::Province), Some("P01"));

    let replacement = LocationPermission::with_level(LocationLevel::Station, "GLI0194");
    assert_eq!(replacement.value_for(LocationLevel::Province), None);
    assert_eq!(
        replacement.active(),
        Some((LocationLevel::Station, "GLI0194"))
    );
}

#[test]
fn test_from_parts_round_trip() {
    let permission = LocationPermission::from_parts(
        None,
        None,
        None,
        Some("D-17".to_string()),
        None,
        None,
    );
    assert_eq!(permission.active(), Some((LocationLevel::District, "D-17")));
}
