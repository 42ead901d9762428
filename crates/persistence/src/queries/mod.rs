// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic read queries, expressed in Diesel DSL.

pub mod locations;
pub mod references;
pub mod users;
