// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Station feed source.
//!
//! The production feed is an internal SOAP endpoint that is not reachable
//! from this service yet; until it is, the fetch returns a fixed sample so
//! the sync path stays exercised end to end.
//!
//! TODO: replace the fixed sample with the real feed client once the
//! endpoint is reachable from this network segment.

/// One record from the station feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationFeedRecord {
    /// The station code.
    pub station_code: String,
    /// The email of the user the station belongs to.
    pub email: String,
}

impl StationFeedRecord {
    fn new(station_code: &str, email: &str) -> Self {
        Self {
            station_code: station_code.to_string(),
            email: email.to_string(),
        }
    }
}

/// Fetches the current station feed.
#[must_use]
pub fn fetch_station_records() -> Vec<StationFeedRecord> {
    vec![
        StationFeedRecord::new("GLI0194", "hienlt11@viettel.com.vn"),
        StationFeedRecord::new("GLI0193-13", "hienlt11@viettel.com.vn"),
        StationFeedRecord::new("GLI0195", "hienlt11@viettel.com.vn"),
    ]
}
