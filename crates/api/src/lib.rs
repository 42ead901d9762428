// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API layer for the regsync user registry.
//!
//! Each public handler is one complete operation over the persistence
//! adapter: snapshot reconciliation, permission updates, user listing,
//! the location catalog, and station sync. The HTTP server is a thin
//! shell over these; everything testable lives here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]

mod error;
mod handlers;
mod request_response;
mod station_feed;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use handlers::{
    get_station, get_users, list_locations, sync_stations, update_users, upsert_users,
};
pub use request_response::{
    BulkUpsertRequest, ListUsersQuery, LocationCatalogResponse, LocationPermissionView,
    LocationSelection, MessageResponse, PermissionUpdate, PermissionUpdateRequest, SnapshotUser,
    StationResponse, UserPage, UserView,
};
pub use station_feed::{StationFeedRecord, fetch_station_records};
