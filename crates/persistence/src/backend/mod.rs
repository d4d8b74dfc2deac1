// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Only `SQLite` is supported. This module is limited to connection
//! initialization, migrations, PRAGMA configuration and the few helpers
//! with no Diesel DSL equivalent. All domain queries and mutations live in
//! `queries/` and `mutations/`.

pub mod sqlite;
