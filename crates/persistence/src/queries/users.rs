// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User table read queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use regsync_domain::UserRecord;
use std::collections::BTreeSet;

use crate::data_models::{UserFilter, UserRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Returns the subset of `candidates` that exist as stored usernames.
///
/// One bulk query regardless of batch size; this is the existence fetch
/// the batch differ partitions against.
pub fn existing_usernames(
    conn: &mut SqliteConnection,
    candidates: &[String],
) -> Result<BTreeSet<String>, PersistenceError> {
    let found: Vec<String> = diesel_schema::users::table
        .filter(diesel_schema::users::username.eq_any(candidates))
        .select(diesel_schema::users::username)
        .load(conn)?;
    Ok(found.into_iter().collect())
}

/// Returns every stored username.
///
/// Used by delete-absent upserts, which diff the whole stored key set
/// against the snapshot.
pub fn all_usernames(conn: &mut SqliteConnection) -> Result<BTreeSet<String>, PersistenceError> {
    let found: Vec<String> = diesel_schema::users::table
        .select(diesel_schema::users::username)
        .load(conn)?;
    Ok(found.into_iter().collect())
}

/// Loads full records for the given usernames in one bulk query.
///
/// Absent usernames are simply not in the result; callers decide whether
/// that is an error.
pub fn users_by_usernames(
    conn: &mut SqliteConnection,
    usernames: &[String],
) -> Result<Vec<UserRecord>, PersistenceError> {
    let rows: Vec<UserRow> = diesel_schema::users::table
        .filter(diesel_schema::users::username.eq_any(usernames))
        .select(UserRow::as_select())
        .load(conn)?;
    rows.into_iter().map(UserRow::into_record).collect()
}

/// Loads one page of users matching the filter, plus the total match count.
///
/// `page` is zero-based. Results are ordered by username so pagination is
/// stable across calls. Substring filters rely on SQLite's case-insensitive
/// `LIKE`.
pub fn list_users(
    conn: &mut SqliteConnection,
    filter: &UserFilter,
    page: i64,
    size: i64,
) -> Result<(Vec<UserRecord>, i64), PersistenceError> {
    let total: i64 = filtered(filter).count().get_result(conn)?;

    let rows: Vec<UserRow> = filtered(filter)
        .select(UserRow::as_select())
        .order(diesel_schema::users::username.asc())
        .limit(size)
        .offset(page.saturating_mul(size))
        .load(conn)?;

    let records: Result<Vec<UserRecord>, PersistenceError> =
        rows.into_iter().map(UserRow::into_record).collect();
    Ok((records?, total))
}

/// Builds the boxed filter query shared by the count and page reads.
fn filtered(filter: &UserFilter) -> diesel_schema::users::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    let mut query = diesel_schema::users::table.into_boxed();
    if let Some(allowed) = filter.is_allowed {
        query = query.filter(diesel_schema::users::is_allowed.eq(i32::from(allowed)));
    }
    if let Some(pattern) = &filter.username {
        query = query.filter(diesel_schema::users::username.like(format!("%{pattern}%")));
    }
    if let Some(pattern) = &filter.department {
        query = query.filter(diesel_schema::users::department.like(format!("%{pattern}%")));
    }
    query
}
