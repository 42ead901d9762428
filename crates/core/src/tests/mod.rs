// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use regsync_domain::{UserProfile, UserRecord, Username};

pub fn profile(email: &str, fullname: &str) -> UserProfile {
    UserProfile {
        email: email.to_string(),
        employee_id: Some(String::from("E-100")),
        fullname: Some(fullname.to_string()),
        department: Some(String::from("Network Operations")),
        position: Some(String::from("Technician")),
        phone_number: Some(String::from("0900000000")),
        birth_year: Some(String::from("1990")),
    }
}

pub fn stored_record(username: &str) -> UserRecord {
    let username = Username::new(username).expect("Valid test username");
    let email = format!("{}@example.com", username.value());
    UserRecord::new_unprivileged(username, profile(&email, "Stored User"))
}
