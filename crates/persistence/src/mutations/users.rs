// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User table mutations. All helpers here expect to run inside a
//! transaction opened by the `Persistence` adapter.

use diesel::prelude::*;
use diesel::SqliteConnection;
use regsync_domain::{UserProfile, UserRecord, Username};
use tracing::debug;

use crate::data_models::UserRow;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts new user rows in one batch statement.
pub fn insert_users(
    conn: &mut SqliteConnection,
    records: &[UserRecord],
) -> Result<(), PersistenceError> {
    if records.is_empty() {
        return Ok(());
    }
    let rows: Vec<UserRow> = records.iter().map(UserRow::from_record).collect();
    diesel::insert_into(diesel_schema::users::table)
        .values(&rows)
        .execute(conn)?;
    debug!(count = records.len(), "Inserted new users");
    Ok(())
}

/// Overwrites profile columns for existing users.
///
/// Permission state (allowed flag, agent/field permissions, approval
/// timestamp, location columns) and `station_default` are deliberately not
/// in the column list; an upsert must never disturb them.
pub fn update_profiles(
    conn: &mut SqliteConnection,
    updates: &[(Username, UserProfile)],
) -> Result<(), PersistenceError> {
    for (username, profile) in updates {
        let rows_affected = diesel::update(
            diesel_schema::users::table
                .filter(diesel_schema::users::username.eq(username.value())),
        )
        .set((
            diesel_schema::users::email.eq(&profile.email),
            diesel_schema::users::employee_id.eq(&profile.employee_id),
            diesel_schema::users::fullname.eq(&profile.fullname),
            diesel_schema::users::department.eq(&profile.department),
            diesel_schema::users::position.eq(&profile.position),
            diesel_schema::users::phone_number.eq(&profile.phone_number),
            diesel_schema::users::birth_year.eq(&profile.birth_year),
        ))
        .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "User '{}' disappeared during batch update",
                username.value()
            )));
        }
    }
    debug!(count = updates.len(), "Updated user profiles");
    Ok(())
}

/// Rewrites permission state for the given users.
///
/// Writes the allowed flag, both permission strings, the approval
/// timestamp, and all six location columns in one statement per user.
/// `station_default` stays untouched; only the station sync collaborator
/// writes that column.
pub fn update_permissions(
    conn: &mut SqliteConnection,
    records: &[UserRecord],
) -> Result<(), PersistenceError> {
    use regsync_domain::LocationLevel;
    for record in records {
        let location = &record.location;
        let rows_affected = diesel::update(
            diesel_schema::users::table
                .filter(diesel_schema::users::username.eq(record.username.value())),
        )
        .set((
            diesel_schema::users::is_allowed.eq(i32::from(record.is_allowed)),
            diesel_schema::users::agent_permission.eq(&record.agent_permission),
            diesel_schema::users::field_permission.eq(&record.field_permission),
            diesel_schema::users::approved_at.eq(&record.approved_at),
            diesel_schema::users::nation.eq(location.value_for(LocationLevel::Nation)),
            diesel_schema::users::area.eq(location.value_for(LocationLevel::Area)),
            diesel_schema::users::province.eq(location.value_for(LocationLevel::Province)),
            diesel_schema::users::district.eq(location.value_for(LocationLevel::District)),
            diesel_schema::users::main_station.eq(location.value_for(LocationLevel::MainStation)),
            diesel_schema::users::station.eq(location.value_for(LocationLevel::Station)),
        ))
        .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "User '{}' disappeared during permission update",
                record.username.value()
            )));
        }
    }
    debug!(count = records.len(), "Updated user permissions");
    Ok(())
}

/// Deletes the given usernames in one batch statement.
pub fn delete_users(
    conn: &mut SqliteConnection,
    usernames: &[Username],
) -> Result<usize, PersistenceError> {
    if usernames.is_empty() {
        return Ok(0);
    }
    let keys: Vec<&str> = usernames.iter().map(Username::value).collect();
    let deleted = diesel::delete(
        diesel_schema::users::table.filter(diesel_schema::users::username.eq_any(keys)),
    )
    .execute(conn)?;
    debug!(count = deleted, "Deleted users absent from snapshot");
    Ok(deleted)
}
