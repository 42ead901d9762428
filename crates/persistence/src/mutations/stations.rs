// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Station sync mutations.
//!
//! The station sync collaborator is the only writer of `station_default`;
//! the reconciliation engine never touches that column.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts a station code if it is not already stored.
///
/// Returns true when a new row was inserted.
pub fn insert_station_if_missing(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<bool, PersistenceError> {
    let inserted = diesel::insert_or_ignore_into(diesel_schema::stations::table)
        .values(diesel_schema::stations::code.eq(code))
        .execute(conn)?;
    if inserted > 0 {
        debug!(code, "Inserted new station");
    }
    Ok(inserted > 0)
}

/// Sets `station_default` for one user.
///
/// Returns false when no user with that username is stored; feed records
/// for unknown users are skipped, not errors.
pub fn set_station_default(
    conn: &mut SqliteConnection,
    username: &str,
    station_code: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected = diesel::update(
        diesel_schema::users::table.filter(diesel_schema::users::username.eq(username)),
    )
    .set(diesel_schema::users::station_default.eq(station_code))
    .execute(conn)?;
    if rows_affected > 0 {
        debug!(username, station_code, "Set default station");
    }
    Ok(rows_affected > 0)
}
