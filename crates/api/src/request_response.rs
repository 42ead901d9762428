// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These are distinct from domain types and represent the wire contract;
//! field names match the JSON the upstream HR exporter and the frontend
//! already speak.

use regsync_domain::{LocationLevel, UserProfile, UserRecord};
use regsync_persistence::{DistrictEntry, LocationEntry, ProvinceEntry};

/// One user entry from the HR snapshot feed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotUser {
    /// The user's email address. The username is derived from it.
    pub email: String,
    /// The employer-assigned employee identifier.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The user's full display name.
    #[serde(default)]
    pub fullname: Option<String>,
    /// The user's department.
    #[serde(default)]
    pub department: Option<String>,
    /// The user's position title.
    #[serde(default)]
    pub position: Option<String>,
    /// The user's phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// The user's birth year.
    #[serde(default)]
    pub birth_year: Option<String>,
}

impl SnapshotUser {
    /// Converts this entry into a domain profile.
    #[must_use]
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            employee_id: self.employee_id.clone(),
            fullname: self.fullname.clone(),
            department: self.department.clone(),
            position: self.position.clone(),
            phone_number: self.phone_number.clone(),
            birth_year: self.birth_year.clone(),
        }
    }
}

/// API request to reconcile the registry against an HR snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkUpsertRequest {
    /// The snapshot entries.
    pub data: Vec<SnapshotUser>,
    /// When true, stored users absent from the snapshot are deleted.
    #[serde(rename = "deleteNonExistPeople", default)]
    pub delete_non_exist_people: bool,
}

/// The requested location scope for a permission grant.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LocationSelection {
    /// The location level name (nation, area, province, district,
    /// main_station, or station).
    pub level: String,
    /// Comma-separated location codes at that level.
    pub value: String,
}

/// One permission change from the update request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PermissionUpdate {
    /// The target username.
    pub username: String,
    /// Whether access is being granted or revoked.
    pub is_allowed: bool,
    /// Agent codes to grant. Required when granting.
    #[serde(default)]
    pub agent: Option<Vec<String>>,
    /// Field codes to grant. Required when granting.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// The location scope to grant. Required when granting.
    #[serde(default)]
    pub location_permission: Option<LocationSelection>,
}

/// API request to update permissions for a batch of users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PermissionUpdateRequest {
    /// The permission changes.
    pub data: Vec<PermissionUpdate>,
}

/// Query parameters for the user listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUsersQuery {
    /// Match on the allowed flag.
    #[serde(default)]
    pub is_allowed: Option<bool>,
    /// Case-insensitive username substring.
    #[serde(default)]
    pub username: Option<String>,
    /// Case-insensitive department substring.
    #[serde(default)]
    pub department: Option<String>,
    /// Zero-based page number.
    #[serde(default)]
    pub page: i64,
    /// Page size (1 to 100).
    #[serde(default = "default_page_size")]
    pub size: i64,
}

const fn default_page_size() -> i64 {
    10
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            is_allowed: None,
            username: None,
            department: None,
            page: 0,
            size: default_page_size(),
        }
    }
}

/// A simple success message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    /// A success message.
    pub message: String,
}

/// The location scope of one user, as stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LocationPermissionView {
    /// Granted nation codes, if the grant is at nation level.
    pub nation: Option<String>,
    /// Granted area codes.
    pub area: Option<String>,
    /// Granted province codes.
    pub province: Option<String>,
    /// Granted district codes.
    pub district: Option<String>,
    /// Granted main station codes.
    pub main_station: Option<String>,
    /// Granted station codes.
    pub station: Option<String>,
    /// The user's default station, maintained by the station sync feed.
    pub station_default: Option<String>,
}

/// One user as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserView {
    /// The registry username.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// The employer-assigned employee identifier.
    pub employee_id: Option<String>,
    /// The user's full display name.
    pub fullname: Option<String>,
    /// The user's department.
    pub department: Option<String>,
    /// The user's position title.
    pub position: Option<String>,
    /// The user's phone number.
    pub phone_number: Option<String>,
    /// The user's birth year.
    pub birth_year: Option<String>,
    /// Whether the user currently holds access.
    pub is_allowed: bool,
    /// Comma-separated granted agent codes.
    pub agent_permission: String,
    /// Comma-separated granted field codes.
    pub field_permission: String,
    /// When the current grant was approved (RFC 3339).
    pub approved_at: Option<String>,
    /// The user's location scope.
    pub location_permission: LocationPermissionView,
}

impl UserView {
    /// Builds the wire view of one stored record.
    #[must_use]
    pub fn from_record(record: &UserRecord) -> Self {
        let owned = |level: LocationLevel| record.location.value_for(level).map(str::to_string);
        Self {
            username: record.username.value().to_string(),
            email: record.profile.email.clone(),
            employee_id: record.profile.employee_id.clone(),
            fullname: record.profile.fullname.clone(),
            department: record.profile.department.clone(),
            position: record.profile.position.clone(),
            phone_number: record.profile.phone_number.clone(),
            birth_year: record.profile.birth_year.clone(),
            is_allowed: record.is_allowed,
            agent_permission: record.agent_permission.clone(),
            field_permission: record.field_permission.clone(),
            approved_at: record.approved_at.clone(),
            location_permission: LocationPermissionView {
                nation: owned(LocationLevel::Nation),
                area: owned(LocationLevel::Area),
                province: owned(LocationLevel::Province),
                district: owned(LocationLevel::District),
                main_station: owned(LocationLevel::MainStation),
                station: owned(LocationLevel::Station),
                station_default: record.station_default.clone(),
            },
        }
    }
}

/// API response for the user listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserPage {
    /// The users on this page, ordered by username.
    pub content: Vec<UserView>,
    /// The zero-based page number.
    pub page: i64,
    /// The requested page size.
    pub size: i64,
    /// The total number of users matching the filter.
    pub total_elements: i64,
    /// The total number of pages.
    pub total_pages: i64,
}

/// API response for the location catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LocationCatalogResponse {
    /// All nations.
    pub nations: Vec<LocationEntry>,
    /// All areas.
    pub areas: Vec<LocationEntry>,
    /// All provinces with their parent area codes.
    pub provinces: Vec<ProvinceEntry>,
    /// All districts with their parent province codes.
    pub districts: Vec<DistrictEntry>,
    /// All main stations.
    pub main_stations: Vec<LocationEntry>,
}

/// API response for a single station lookup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StationResponse {
    /// The station code.
    pub code: String,
}
