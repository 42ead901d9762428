// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch differ: extraction, deduplication, and create/update/delete
//! partitioning for bulk snapshots.

use regsync_domain::{UserProfile, Username};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The keyed working set extracted from a raw upsert snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBatch {
    /// Deduplicated records keyed by derived username, in key order.
    pub records: Vec<(Username, UserProfile)>,
    /// Records dropped because their email was null or blank.
    pub skipped_blank_email: usize,
}

/// Extracts the valid keyed records from an incoming snapshot.
///
/// Usernames are derived from each record's email local part. Records with
/// a blank email are dropped (counted in `skipped_blank_email`) without
/// failing the batch. When the same derived username appears more than once,
/// the later occurrence overwrites the earlier one.
#[must_use]
pub fn extract_upsert_records(profiles: Vec<UserProfile>) -> ExtractedBatch {
    let mut skipped_blank_email = 0usize;
    let mut deduped: BTreeMap<Username, UserProfile> = BTreeMap::new();

    for profile in profiles {
        let Some(username) = Username::from_email(&profile.email) else {
            skipped_blank_email += 1;
            continue;
        };
        // Last occurrence wins within a batch.
        deduped.insert(username, profile);
    }

    ExtractedBatch {
        records: deduped.into_iter().collect(),
        skipped_blank_email,
    }
}

/// The create/update/delete partition of one upsert batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPartition {
    /// Records whose key is not yet stored.
    pub to_create: Vec<(Username, UserProfile)>,
    /// Records whose key already exists. Only profile fields may be
    /// overwritten for these; permission state is preserved.
    pub to_update: Vec<(Username, UserProfile)>,
    /// Stored keys absent from the snapshot. Populated only when deletion
    /// was requested.
    pub to_delete: Vec<Username>,
}

/// Partitions a deduplicated batch against the stored key set.
///
/// The partition is purely existence-based: a record goes to `to_create`
/// iff its key is absent from `existing_keys`. When `delete_absent` is true,
/// `existing_keys` must be the complete stored key set and every stored key
/// missing from the batch lands in `to_delete`; when false, `existing_keys`
/// only needs to cover the batch's own keys and no deletions are produced.
#[must_use]
pub fn partition_upsert(
    records: Vec<(Username, UserProfile)>,
    existing_keys: &BTreeSet<String>,
    delete_absent: bool,
) -> BatchPartition {
    let mut partition = BatchPartition::default();

    let incoming_keys: BTreeSet<&str> = records
        .iter()
        .map(|(username, _)| username.value())
        .collect();

    if delete_absent {
        for key in existing_keys {
            if !incoming_keys.contains(key.as_str()) {
                if let Ok(username) = Username::new(key) {
                    partition.to_delete.push(username);
                }
            }
        }
    }

    for (username, profile) in records {
        if existing_keys.contains(username.value()) {
            partition.to_update.push((username, profile));
        } else {
            partition.to_create.push((username, profile));
        }
    }

    partition
}
