// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Location catalog reads.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{DistrictEntry, LocationCatalog, LocationEntry, ProvinceEntry};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Loads the full location reference catalog.
pub fn location_catalog(conn: &mut SqliteConnection) -> Result<LocationCatalog, PersistenceError> {
    let nations = diesel_schema::nations::table
        .order(diesel_schema::nations::code.asc())
        .load::<(String, Option<String>)>(conn)?
        .into_iter()
        .map(|(code, name)| LocationEntry { code, name })
        .collect();

    let areas = diesel_schema::areas::table
        .order(diesel_schema::areas::code.asc())
        .load::<(String, Option<String>)>(conn)?
        .into_iter()
        .map(|(code, name)| LocationEntry { code, name })
        .collect();

    let provinces = diesel_schema::provinces::table
        .order(diesel_schema::provinces::code.asc())
        .load::<(String, Option<String>, Option<String>, Option<String>)>(conn)?
        .into_iter()
        .map(|(code, name, kind, area_code)| ProvinceEntry {
            code,
            name,
            kind,
            area_code,
        })
        .collect();

    let districts = diesel_schema::districts::table
        .order(diesel_schema::districts::code.asc())
        .load::<(String, Option<String>, Option<String>, Option<String>)>(conn)?
        .into_iter()
        .map(|(code, name, kind, province_code)| DistrictEntry {
            code,
            name,
            kind,
            province_code,
        })
        .collect();

    let main_stations = diesel_schema::main_stations::table
        .order(diesel_schema::main_stations::code.asc())
        .load::<(String, Option<String>)>(conn)?
        .into_iter()
        .map(|(code, name)| LocationEntry { code, name })
        .collect();

    Ok(LocationCatalog {
        nations,
        areas,
        provinces,
        districts,
        main_stations,
    })
}

/// Looks up one station by code.
///
/// Returns `None` when the station is not stored.
pub fn find_station(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<String>, PersistenceError> {
    let result = diesel_schema::stations::table
        .filter(diesel_schema::stations::code.eq(code))
        .select(diesel_schema::stations::code)
        .first::<String>(conn);

    match result {
        Ok(found) => Ok(Some(found)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
