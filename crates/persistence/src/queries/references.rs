// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk existence checks against the reference tables.
//!
//! Each function issues exactly one query for the whole code set and
//! returns the codes that are NOT stored. The engine validates every
//! domain a batch references with one call per domain.

use diesel::prelude::*;
use diesel::SqliteConnection;
use regsync_domain::LocationLevel;
use std::collections::BTreeSet;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Returns the agent ids from `ids` that do not exist.
pub fn missing_agent_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> Result<Vec<i64>, PersistenceError> {
    let found: BTreeSet<i64> = diesel_schema::agents::table
        .filter(diesel_schema::agents::agent_id.eq_any(ids))
        .select(diesel_schema::agents::agent_id)
        .load::<i64>(conn)?
        .into_iter()
        .collect();
    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}

/// Returns the field ids from `ids` that do not exist.
pub fn missing_field_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> Result<Vec<i64>, PersistenceError> {
    let found: BTreeSet<i64> = diesel_schema::fields::table
        .filter(diesel_schema::fields::field_id.eq_any(ids))
        .select(diesel_schema::fields::field_id)
        .load::<i64>(conn)?
        .into_iter()
        .collect();
    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}

/// Returns the location codes from `codes` that do not exist at `level`.
///
/// The six location domains share one uniform `{code}` shape, so a single
/// function parameterized by level covers all of them. Codes are compared
/// case-sensitively against the stored primary key (`LIKE` is not involved).
pub fn missing_location_codes(
    conn: &mut SqliteConnection,
    level: LocationLevel,
    codes: &[String],
) -> Result<Vec<String>, PersistenceError> {
    let found: Vec<String> = match level {
        LocationLevel::Nation => diesel_schema::nations::table
            .filter(diesel_schema::nations::code.eq_any(codes))
            .select(diesel_schema::nations::code)
            .load(conn)?,
        LocationLevel::Area => diesel_schema::areas::table
            .filter(diesel_schema::areas::code.eq_any(codes))
            .select(diesel_schema::areas::code)
            .load(conn)?,
        LocationLevel::Province => diesel_schema::provinces::table
            .filter(diesel_schema::provinces::code.eq_any(codes))
            .select(diesel_schema::provinces::code)
            .load(conn)?,
        LocationLevel::District => diesel_schema::districts::table
            .filter(diesel_schema::districts::code.eq_any(codes))
            .select(diesel_schema::districts::code)
            .load(conn)?,
        LocationLevel::MainStation => diesel_schema::main_stations::table
            .filter(diesel_schema::main_stations::code.eq_any(codes))
            .select(diesel_schema::main_stations::code)
            .load(conn)?,
        LocationLevel::Station => diesel_schema::stations::table
            .filter(diesel_schema::stations::code.eq_any(codes))
            .select(diesel_schema::stations::code)
            .load(conn)?,
    };

    let found: BTreeSet<String> = found.into_iter().collect();
    Ok(codes
        .iter()
        .filter(|code| !found.contains(*code))
        .cloned()
        .collect())
}
