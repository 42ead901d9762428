// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One level of the geographic permission hierarchy.
///
/// Levels are ordered from broadest (`Nation`) to narrowest (`Station`).
/// A user's location permission is active at exactly one level at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationLevel {
    /// Country-wide access.
    Nation,
    /// Regional area access.
    Area,
    /// Province access.
    Province,
    /// District access.
    District,
    /// Main station access.
    MainStation,
    /// Single station access.
    Station,
}

impl LocationLevel {
    /// All six levels, broadest first.
    pub const ALL: [Self; 6] = [
        Self::Nation,
        Self::Area,
        Self::Province,
        Self::District,
        Self::MainStation,
        Self::Station,
    ];

    /// Converts this level to its wire/storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nation => "nation",
            Self::Area => "area",
            Self::Province => "province",
            Self::District => "district",
            Self::MainStation => "main_station",
            Self::Station => "station",
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Nation => "Nation",
            Self::Area => "Area",
            Self::Province => "Province",
            Self::District => "District",
            Self::MainStation => "Main station",
            Self::Station => "Station",
        }
    }
}

impl FromStr for LocationLevel {
    type Err = DomainError;

    /// Parses a level name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nation" => Ok(Self::Nation),
            "area" => Ok(Self::Area),
            "province" => Ok(Self::Province),
            "district" => Ok(Self::District),
            "main_station" => Ok(Self::MainStation),
            "station" => Ok(Self::Station),
            _ => Err(DomainError::InvalidLocationLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's location permission: at most one active (level, value) pair.
///
/// The six level fields mirror the stored columns. The single-active-level
/// invariant is enforced by construction: `cleared` produces the empty
/// permission and `with_level` sets exactly one field, clearing the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPermission {
    nation: Option<String>,
    area: Option<String>,
    province: Option<String>,
    district: Option<String>,
    main_station: Option<String>,
    station: Option<String>,
}

impl LocationPermission {
    /// The empty permission: no level active.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            nation: None,
            area: None,
            province: None,
            district: None,
            main_station: None,
            station: None,
        }
    }

    /// A permission with exactly the given level set and all others clear.
    #[must_use]
    pub fn with_level(level: LocationLevel, value: &str) -> Self {
        let mut permission = Self::cleared();
        let slot = match level {
            LocationLevel::Nation => &mut permission.nation,
            LocationLevel::Area => &mut permission.area,
            LocationLevel::Province => &mut permission.province,
            LocationLevel::District => &mut permission.district,
            LocationLevel::MainStation => &mut permission.main_station,
            LocationLevel::Station => &mut permission.station,
        };
        *slot = Some(value.to_string());
        permission
    }

    /// Reconstructs a permission from stored column values.
    ///
    /// Used by the persistence layer when loading a user row. No invariant
    /// check is performed here; stored rows are written through `cleared`
    /// and `with_level` and therefore already satisfy it.
    #[must_use]
    pub const fn from_parts(
        nation: Option<String>,
        area: Option<String>,
        province: Option<String>,
        district: Option<String>,
        main_station: Option<String>,
        station: Option<String>,
    ) -> Self {
        Self {
            nation,
            area,
            province,
            district,
            main_station,
            station,
        }
    }

    /// Returns the stored value for the given level, if set.
    #[must_use]
    pub fn value_for(&self, level: LocationLevel) -> Option<&str> {
        match level {
            LocationLevel::Nation => self.nation.as_deref(),
            LocationLevel::Area => self.area.as_deref(),
            LocationLevel::Province => self.province.as_deref(),
            LocationLevel::District => self.district.as_deref(),
            LocationLevel::MainStation => self.main_station.as_deref(),
            LocationLevel::Station => self.station.as_deref(),
        }
    }

    /// Returns the active (level, value) pair, if any level is set.
    #[must_use]
    pub fn active(&self) -> Option<(LocationLevel, &str)> {
        LocationLevel::ALL
            .iter()
            .find_map(|level| self.value_for(*level).map(|value| (*level, value)))
    }

    /// Returns true when no level is active.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.nation.is_none()
            && self.area.is_none()
            && self.province.is_none()
            && self.district.is_none()
            && self.main_station.is_none()
            && self.station.is_none()
    }

    /// Counts the levels currently set. Valid permissions have 0 or 1.
    #[must_use]
    pub fn active_level_count(&self) -> usize {
        LocationLevel::ALL
            .iter()
            .filter(|level| self.value_for(**level).is_some())
            .count()
    }
}
