// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference-data loading.
//!
//! The reconciliation engine never creates or deletes reference rows; these
//! helpers exist for operational loading and for test setup. Provinces and
//! districts loaded this way carry no parent linkage; the catalog endpoint
//! reports whatever linkage the loaded data has.

use diesel::prelude::*;
use diesel::SqliteConnection;
use regsync_domain::LocationLevel;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts an agent with an explicit id.
pub fn insert_agent(
    conn: &mut SqliteConnection,
    agent_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(diesel_schema::agents::table)
        .values((
            diesel_schema::agents::agent_id.eq(agent_id),
            diesel_schema::agents::name.eq(name),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts a field with an explicit id.
pub fn insert_field(
    conn: &mut SqliteConnection,
    field_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(diesel_schema::fields::table)
        .values((
            diesel_schema::fields::field_id.eq(field_id),
            diesel_schema::fields::name.eq(name),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts a location reference code at the given level.
pub fn insert_location_code(
    conn: &mut SqliteConnection,
    level: LocationLevel,
    code: &str,
    name: Option<&str>,
) -> Result<(), PersistenceError> {
    match level {
        LocationLevel::Nation => {
            diesel::insert_into(diesel_schema::nations::table)
                .values((
                    diesel_schema::nations::code.eq(code),
                    diesel_schema::nations::name.eq(name),
                ))
                .execute(conn)?;
        }
        LocationLevel::Area => {
            diesel::insert_into(diesel_schema::areas::table)
                .values((
                    diesel_schema::areas::code.eq(code),
                    diesel_schema::areas::name.eq(name),
                ))
                .execute(conn)?;
        }
        LocationLevel::Province => {
            diesel::insert_into(diesel_schema::provinces::table)
                .values((
                    diesel_schema::provinces::code.eq(code),
                    diesel_schema::provinces::name.eq(name),
                ))
                .execute(conn)?;
        }
        LocationLevel::District => {
            diesel::insert_into(diesel_schema::districts::table)
                .values((
                    diesel_schema::districts::code.eq(code),
                    diesel_schema::districts::name.eq(name),
                ))
                .execute(conn)?;
        }
        LocationLevel::MainStation => {
            diesel::insert_into(diesel_schema::main_stations::table)
                .values((
                    diesel_schema::main_stations::code.eq(code),
                    diesel_schema::main_stations::name.eq(name),
                ))
                .execute(conn)?;
        }
        LocationLevel::Station => {
            diesel::insert_into(diesel_schema::stations::table)
                .values(diesel_schema::stations::code.eq(code))
                .execute(conn)?;
        }
    }
    Ok(())
}
