// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconciliation core for the regsync user registry.
//!
//! This crate is pure logic: it diffs incoming bulk snapshots against stored
//! keys, validates referenced codes against prefetched lookup results, and
//! computes permission-state transitions. It performs no I/O; the storage
//! collaborator is driven by the API layer, which feeds bulk query results
//! into these functions and writes the computed batch atomically.

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

mod diff;
mod error;
mod permission;
mod validate;

#[cfg(test)]
mod tests;

pub use diff::{BatchPartition, ExtractedBatch, extract_upsert_records, partition_upsert};
pub use error::CoreError;
pub use permission::{PermissionChange, PermissionGrant, apply_change, plan_change};
pub use validate::{
    ReferencedCodes, check_missing_agents, check_missing_fields, check_missing_location_codes,
    parse_agent_ids, parse_field_ids,
};
