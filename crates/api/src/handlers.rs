// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation handlers.
//!
//! Each handler is one complete API operation: validate the request,
//! run the read-side queries, and apply the write side as a single
//! transactional batch. Validation failures surface before any write.

use std::collections::BTreeMap;

use regsync::{
    PermissionChange, ReferencedCodes, apply_change, check_missing_agents, check_missing_fields,
    check_missing_location_codes, extract_upsert_records, parse_agent_ids, parse_field_ids,
    partition_upsert, plan_change,
};
use regsync_domain::{DomainError, UserRecord, Username};
use regsync_persistence::SqlitePersistence;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::request_response::{
    BulkUpsertRequest, ListUsersQuery, LocationCatalogResponse, MessageResponse, PermissionUpdate,
    PermissionUpdateRequest, StationResponse, UserPage, UserView,
};
use crate::station_feed;

fn current_timestamp() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })
}

/// Reconciles the registry against an HR snapshot.
///
/// Derives usernames from emails, partitions the snapshot into creates
/// and profile updates against stored state, and (when requested) deletes
/// stored users absent from the snapshot. The whole batch commits or
/// rolls back as one transaction.
///
/// # Errors
///
/// Returns `INVALID_REQUEST` for an empty snapshot, `DELETE_ERROR` when
/// the deletion phase fails, and `PROCESSING_ERROR` for other storage
/// failures.
pub fn upsert_users(
    db: &mut SqlitePersistence,
    request: &BulkUpsertRequest,
) -> Result<MessageResponse, ApiError> {
    if request.data.is_empty() {
        return Err(DomainError::EmptyBatch.into());
    }

    let profiles = request.data.iter().map(|entry| entry.to_profile()).collect();
    let extracted = extract_upsert_records(profiles);
    if extracted.skipped_blank_email > 0 {
        warn!(
            skipped = extracted.skipped_blank_email,
            "Skipped snapshot entries with blank emails"
        );
    }

    let existing = if request.delete_non_exist_people {
        db.all_usernames()?
    } else {
        let keys: Vec<String> = extracted
            .records
            .iter()
            .map(|(username, _)| username.value().to_string())
            .collect();
        db.existing_usernames(&keys)?
    };

    let partition = partition_upsert(
        extracted.records,
        &existing,
        request.delete_non_exist_people,
    );
    let creates: Vec<UserRecord> = partition
        .to_create
        .into_iter()
        .map(|(username, profile)| UserRecord::new_unprivileged(username, profile))
        .collect();

    let written = db.apply_upsert_batch(&creates, &partition.to_update, &partition.to_delete)?;
    info!(
        created = creates.len(),
        updated = partition.to_update.len(),
        deleted = partition.to_delete.len(),
        "Applied snapshot batch"
    );
    Ok(MessageResponse {
        message: format!("Successfully processed {written} users"),
    })
}

/// Updates permissions for a batch of users.
///
/// Dedups the request last-wins per username, plans a change for each
/// surviving entry, resolves every referenced user, then validates all
/// referenced agent, field, and location codes with one existence query
/// per reference domain before applying the batch in one transaction.
///
/// # Errors
///
/// Returns `USER_NOT_FOUND`, the per-domain validation codes
/// (`INVALID_AGENT`, `INVALID_FIELD`, `INVALID_LEVEL`, the per-level
/// location codes) before any write; `PROCESSING_ERROR` when the write
/// itself fails.
pub fn update_users(
    db: &mut SqlitePersistence,
    request: &PermissionUpdateRequest,
) -> Result<MessageResponse, ApiError> {
    if request.data.is_empty() {
        return Err(DomainError::EmptyBatch.into());
    }

    // Dedup before planning so a discarded earlier duplicate cannot fail
    // shape validation on behalf of the occurrence that actually applies.
    let mut latest: BTreeMap<&str, &PermissionUpdate> = BTreeMap::new();
    for update in &request.data {
        latest.insert(update.username.as_str(), update);
    }

    let mut changes: BTreeMap<String, PermissionChange> = BTreeMap::new();
    for update in latest.values() {
        let location = update
            .location_permission
            .as_ref()
            .map(|selection| (selection.level.as_str(), selection.value.as_str()));
        let change = plan_change(
            &update.username,
            update.is_allowed,
            update.agent.as_deref(),
            update.field.as_deref(),
            location,
        )?;
        changes.insert(update.username.clone(), change);
    }

    let usernames: Vec<String> = changes.keys().cloned().collect();
    let mut records: BTreeMap<String, UserRecord> = db
        .users_by_usernames(&usernames)?
        .into_iter()
        .map(|record| (record.username.value().to_string(), record))
        .collect();
    for username in changes.keys() {
        if !records.contains_key(username) {
            return Err(DomainError::UserNotFound(username.clone()).into());
        }
    }

    let referenced = ReferencedCodes::collect(changes.values());
    let agent_ids = parse_agent_ids(&referenced.agents)?;
    check_missing_agents(&db.missing_agent_ids(&agent_ids)?)?;
    let field_ids = parse_field_ids(&referenced.fields)?;
    check_missing_fields(&db.missing_field_ids(&field_ids)?)?;
    for (level, codes) in &referenced.locations {
        let codes: Vec<String> = codes.iter().cloned().collect();
        check_missing_location_codes(*level, &db.missing_location_codes(*level, &codes)?)?;
    }

    let approved_at = current_timestamp()?;
    let mut updated: Vec<UserRecord> = Vec::with_capacity(changes.len());
    for (username, change) in &changes {
        let mut record = records
            .remove(username)
            .ok_or_else(|| DomainError::UserNotFound(username.clone()))?;
        apply_change(&mut record, change, &approved_at)?;
        updated.push(record);
    }

    let count = db.apply_permission_updates(&updated)?;
    info!(count, "Applied permission updates");
    Ok(MessageResponse {
        message: format!("Successfully updated permissions for {count} users"),
    })
}

/// Lists users with optional filters and pagination.
///
/// # Errors
///
/// Returns `INVALID_PAGE` for a negative page number and `INVALID_SIZE`
/// for a size outside 1 to 100.
pub fn get_users(
    db: &mut SqlitePersistence,
    query: &ListUsersQuery,
) -> Result<UserPage, ApiError> {
    if query.page < 0 {
        return Err(ApiError::InvalidPage);
    }
    if !(1..=100).contains(&query.size) {
        return Err(ApiError::InvalidSize);
    }

    let filter = regsync_persistence::UserFilter {
        is_allowed: query.is_allowed,
        username: query.username.clone(),
        department: query.department.clone(),
    };
    let (records, total_elements) = db.list_users(&filter, query.page, query.size)?;
    let total_pages = if total_elements == 0 {
        0
    } else {
        (total_elements + query.size - 1) / query.size
    };

    Ok(UserPage {
        content: records.iter().map(UserView::from_record).collect(),
        page: query.page,
        size: query.size,
        total_elements,
        total_pages,
    })
}

/// Returns the full location reference catalog.
///
/// # Errors
///
/// Returns `PROCESSING_ERROR` when a catalog query fails.
pub fn list_locations(db: &mut SqlitePersistence) -> Result<LocationCatalogResponse, ApiError> {
    let catalog = db.location_catalog()?;
    Ok(LocationCatalogResponse {
        nations: catalog.nations,
        areas: catalog.areas,
        provinces: catalog.provinces,
        districts: catalog.districts,
        main_stations: catalog.main_stations,
    })
}

/// Looks up one station by code.
///
/// # Errors
///
/// Returns [`ApiError::StationNotFound`] when no station with that code
/// is stored; the server maps it to a 404 rather than a validation 400.
pub fn get_station(
    db: &mut SqlitePersistence,
    code: &str,
) -> Result<StationResponse, ApiError> {
    let found = db
        .find_station(code)?
        .ok_or_else(|| ApiError::StationNotFound {
            code: code.to_string(),
        })?;
    Ok(StationResponse { code: found })
}

/// Runs one pass of the station feed sync.
///
/// Inserts unseen station codes, then sets the default station for each
/// feed record whose email maps to a stored user. Records for unknown
/// users or with underivable usernames are skipped, not errors.
///
/// # Errors
///
/// Returns `PROCESSING_ERROR` when a feed write fails.
pub fn sync_stations(db: &mut SqlitePersistence) -> Result<MessageResponse, ApiError> {
    let feed = station_feed::fetch_station_records();
    let mut inserted = 0_usize;
    let mut defaults_set = 0_usize;

    for record in &feed {
        if db.insert_station_if_missing(&record.station_code)? {
            inserted += 1;
        }
        match Username::from_email(&record.email) {
            Some(username) => {
                if db.set_station_default(username.value(), &record.station_code)? {
                    defaults_set += 1;
                } else {
                    warn!(
                        username = username.value(),
                        station = record.station_code,
                        "Feed user not in registry, skipping default station"
                    );
                }
            }
            None => {
                warn!(
                    station = record.station_code,
                    "Feed record has no usable email, skipping"
                );
            }
        }
    }

    info!(
        records = feed.len(),
        inserted, defaults_set, "Station sync finished"
    );
    Ok(MessageResponse {
        message: "Station sync triggered successfully".to_string(),
    })
}
