// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the regsync user registry.
//!
//! This crate is the transactional storage collaborator the reconciliation
//! engine writes through. It is built on Diesel over `SQLite`:
//!
//! - In-memory databases for unit and integration tests. Each call to
//!   `new_in_memory()` receives a unique shared-memory database via an
//!   atomic counter, so tests are isolated deterministically.
//! - File-based databases (with WAL mode) for deployments.
//!
//! Foreign key enforcement is verified at startup. Schema changes ship as
//! embedded Diesel migrations and run automatically on connect.
//!
//! The public surface is bulk-oriented to match the engine's batching
//! invariants: one existence query per reference domain per batch, and one
//! transaction per applied batch.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use regsync_domain::{LocationLevel, UserProfile, UserRecord, Username};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    DistrictEntry, LocationCatalog, LocationEntry, ProvinceEntry, UserFilter,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias kept for call sites that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter for the user registry.
///
/// Owns the single database connection; all public methods are whole
/// operations (a bulk read or one transactional batch write).
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Bulk user reads
    // ========================================================================

    /// Returns the subset of `candidates` that exist as stored usernames.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn existing_usernames(
        &mut self,
        candidates: &[String],
    ) -> Result<BTreeSet<String>, PersistenceError> {
        queries::users::existing_usernames(&mut self.conn, candidates)
    }

    /// Returns every stored username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_usernames(&mut self) -> Result<BTreeSet<String>, PersistenceError> {
        queries::users::all_usernames(&mut self.conn)
    }

    /// Loads full records for the given usernames in one bulk query.
    ///
    /// Absent usernames are not represented in the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub fn users_by_usernames(
        &mut self,
        usernames: &[String],
    ) -> Result<Vec<UserRecord>, PersistenceError> {
        queries::users::users_by_usernames(&mut self.conn, usernames)
    }

    /// Loads one page of users matching the filter, plus the total count.
    ///
    /// `page` is zero-based; results are ordered by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(
        &mut self,
        filter: &UserFilter,
        page: i64,
        size: i64,
    ) -> Result<(Vec<UserRecord>, i64), PersistenceError> {
        queries::users::list_users(&mut self.conn, filter, page, size)
    }

    // ========================================================================
    // Reference existence checks (one bulk query per domain)
    // ========================================================================

    /// Returns the agent ids from `ids` that do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn missing_agent_ids(&mut self, ids: &[i64]) -> Result<Vec<i64>, PersistenceError> {
        queries::references::missing_agent_ids(&mut self.conn, ids)
    }

    /// Returns the field ids from `ids` that do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn missing_field_ids(&mut self, ids: &[i64]) -> Result<Vec<i64>, PersistenceError> {
        queries::references::missing_field_ids(&mut self.conn, ids)
    }

    /// Returns the location codes from `codes` not stored at `level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn missing_location_codes(
        &mut self,
        level: LocationLevel,
        codes: &[String],
    ) -> Result<Vec<String>, PersistenceError> {
        queries::references::missing_location_codes(&mut self.conn, level, codes)
    }

    // ========================================================================
    // Transactional batch writes
    // ========================================================================

    /// Applies one upsert batch atomically.
    ///
    /// Creates, profile updates, and (optionally) deletions commit or roll
    /// back as one transaction. Profile updates never disturb permission
    /// state or `station_default`.
    ///
    /// # Returns
    ///
    /// The number of records written (creates plus updates).
    ///
    /// # Errors
    ///
    /// Returns `DeletePhaseFailed` when the deletion step fails, so the
    /// caller can distinguish it from a write failure; in either case
    /// nothing is persisted.
    pub fn apply_upsert_batch(
        &mut self,
        creates: &[UserRecord],
        updates: &[(Username, UserProfile)],
        deletes: &[Username],
    ) -> Result<usize, PersistenceError> {
        self.conn
            .transaction::<usize, PersistenceError, _>(|conn| {
                mutations::users::insert_users(conn, creates)?;
                mutations::users::update_profiles(conn, updates)?;
                if !deletes.is_empty() {
                    mutations::users::delete_users(conn, deletes)
                        .map_err(|e| PersistenceError::DeletePhaseFailed(e.to_string()))?;
                }
                Ok(creates.len() + updates.len())
            })
    }

    /// Applies one permission-update batch atomically.
    ///
    /// # Returns
    ///
    /// The number of users updated.
    ///
    /// # Errors
    ///
    /// Returns an error if any update fails; nothing is persisted.
    pub fn apply_permission_updates(
        &mut self,
        records: &[UserRecord],
    ) -> Result<usize, PersistenceError> {
        self.conn
            .transaction::<usize, PersistenceError, _>(|conn| {
                mutations::users::update_permissions(conn, records)?;
                Ok(records.len())
            })
    }

    // ========================================================================
    // Location catalog & stations
    // ========================================================================

    /// Loads the full location reference catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog query fails.
    pub fn location_catalog(&mut self) -> Result<LocationCatalog, PersistenceError> {
        queries::locations::location_catalog(&mut self.conn)
    }

    /// Looks up one station by code. Returns `None` when not stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_station(&mut self, code: &str) -> Result<Option<String>, PersistenceError> {
        queries::locations::find_station(&mut self.conn, code)
    }

    /// Inserts a station code if it is not already stored.
    ///
    /// Returns true when a new row was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_station_if_missing(&mut self, code: &str) -> Result<bool, PersistenceError> {
        mutations::stations::insert_station_if_missing(&mut self.conn, code)
    }

    /// Sets `station_default` for one user.
    ///
    /// Returns false when no user with that username is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_station_default(
        &mut self,
        username: &str,
        station_code: &str,
    ) -> Result<bool, PersistenceError> {
        mutations::stations::set_station_default(&mut self.conn, username, station_code)
    }

    // ========================================================================
    // Reference-data loading
    // ========================================================================

    /// Inserts an agent with an explicit id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_agent(&mut self, agent_id: i64, name: &str) -> Result<(), PersistenceError> {
        mutations::references::insert_agent(&mut self.conn, agent_id, name)
    }

    /// Inserts a field with an explicit id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_field(&mut self, field_id: i64, name: &str) -> Result<(), PersistenceError> {
        mutations::references::insert_field(&mut self.conn, field_id, name)
    }

    /// Inserts a location reference code at the given level.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_location_code(
        &mut self,
        level: LocationLevel,
        code: &str,
        name: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::references::insert_location_code(&mut self.conn, level, code, name)
    }
}
