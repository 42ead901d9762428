// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs mapping between the Diesel schema and domain records.

use diesel::prelude::*;
use regsync_domain::{LocationPermission, UserProfile, UserRecord, Username};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// The full `users` row as stored.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::diesel_schema::users)]
pub(crate) struct UserRow {
    pub username: String,
    pub email: String,
    pub employee_id: Option<String>,
    pub fullname: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
    pub birth_year: Option<String>,
    pub is_allowed: i32,
    pub agent_permission: String,
    pub field_permission: String,
    pub approved_at: Option<String>,
    pub nation: Option<String>,
    pub area: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub main_station: Option<String>,
    pub station: Option<String>,
    pub station_default: Option<String>,
}

impl UserRow {
    /// Builds a row from a domain record for insertion.
    pub(crate) fn from_record(record: &UserRecord) -> Self {
        use regsync_domain::LocationLevel;
        let location = &record.location;
        Self {
            username: record.username.value().to_string(),
            email: record.profile.email.clone(),
            employee_id: record.profile.employee_id.clone(),
            fullname: record.profile.fullname.clone(),
            department: record.profile.department.clone(),
            position: record.profile.position.clone(),
            phone_number: record.profile.phone_number.clone(),
            birth_year: record.profile.birth_year.clone(),
            is_allowed: i32::from(record.is_allowed),
            agent_permission: record.agent_permission.clone(),
            field_permission: record.field_permission.clone(),
            approved_at: record.approved_at.clone(),
            nation: location.value_for(LocationLevel::Nation).map(String::from),
            area: location.value_for(LocationLevel::Area).map(String::from),
            province: location.value_for(LocationLevel::Province).map(String::from),
            district: location.value_for(LocationLevel::District).map(String::from),
            main_station: location
                .value_for(LocationLevel::MainStation)
                .map(String::from),
            station: location.value_for(LocationLevel::Station).map(String::from),
            station_default: record.station_default.clone(),
        }
    }

    /// Turns a stored row back into a domain record.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRecord` if the stored username is blank; rows are
    /// only ever written with validated keys.
    pub(crate) fn into_record(self) -> Result<UserRecord, PersistenceError> {
        let username = Username::new(&self.username)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        Ok(UserRecord {
            username,
            profile: UserProfile {
                email: self.email,
                employee_id: self.employee_id,
                fullname: self.fullname,
                department: self.department,
                position: self.position,
                phone_number: self.phone_number,
                birth_year: self.birth_year,
            },
            is_allowed: self.is_allowed != 0,
            agent_permission: self.agent_permission,
            field_permission: self.field_permission,
            approved_at: self.approved_at,
            location: LocationPermission::from_parts(
                self.nation,
                self.area,
                self.province,
                self.district,
                self.main_station,
                self.station,
            ),
            station_default: self.station_default,
        })
    }
}

/// One entry of a flat reference domain (nation, area, main station).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    /// The reference code (primary key).
    pub code: String,
    /// Display name, when the feed supplied one.
    pub name: Option<String>,
}

/// One province entry, carrying its parent area code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceEntry {
    /// The reference code (primary key).
    pub code: String,
    /// Display name.
    pub name: Option<String>,
    /// Administrative type of the province.
    pub kind: Option<String>,
    /// Parent area code.
    pub area_code: Option<String>,
}

/// One district entry, carrying its parent province code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictEntry {
    /// The reference code (primary key).
    pub code: String,
    /// Display name.
    pub name: Option<String>,
    /// Administrative type of the district.
    pub kind: Option<String>,
    /// Parent province code.
    pub province_code: Option<String>,
}

/// The full location reference catalog, as served to clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCatalog {
    /// All nations.
    pub nations: Vec<LocationEntry>,
    /// All areas.
    pub areas: Vec<LocationEntry>,
    /// All provinces.
    pub provinces: Vec<ProvinceEntry>,
    /// All districts.
    pub districts: Vec<DistrictEntry>,
    /// All main stations.
    pub main_stations: Vec<LocationEntry>,
}

/// Filters for the paginated user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Match on the allowed flag.
    pub is_allowed: Option<bool>,
    /// Case-insensitive username substring.
    pub username: Option<String>,
    /// Case-insensitive department substring.
    pub department: Option<String>,
}
