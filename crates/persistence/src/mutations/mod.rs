// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutations, expressed in Diesel DSL.
//!
//! Batch mutations are plain helpers; transaction boundaries are owned by
//! the `Persistence` adapter so a whole batch commits or rolls back as one.

pub mod references;
pub mod stations;
pub mod users;
