// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific utilities.
//!
//! All domain queries and mutations are backend-agnostic Diesel DSL and
//! live in `queries/` and `mutations/`. Only connection initialization,
//! migrations, and PRAGMA handling belong here.

pub mod sqlite;
