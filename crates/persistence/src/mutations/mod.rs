// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `directory`: Employees, organizations and representative mappings
//! - `tenders`: Tender creation and the versioned tender writes
//! - `bids`: Bid creation and the versioned bid writes
//! - `decisions`: Vote inserts
//! - `feedback`: Review inserts
//!
//! ## Versioning
//!
//! Every write that changes a tender or bid after creation snapshots the
//! live row into its history table first. History writes are upserts keyed
//! by `(id, version)`, so re-snapshotting an unchanged version is harmless.

pub mod bids;
pub mod decisions;
pub mod directory;
pub mod feedback;
pub mod tenders;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::error::PersistenceError;

/// Generates a fresh row identifier.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns the current UTC time as an RFC 3339 string.
pub(crate) fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}
