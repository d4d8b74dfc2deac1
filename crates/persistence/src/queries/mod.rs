// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `directory`: Employees, organizations and representative mappings
//! - `tenders`: Live tender rows and tender listings
//! - `bids`: Live bid rows and bid listings
//! - `decisions`: Vote tallies
//! - `feedback`: Reviews by author

pub mod bids;
pub mod decisions;
pub mod directory;
pub mod feedback;
pub mod tenders;

use tender_market_domain::Page;

/// Converts a page into Diesel `(limit, offset)` arguments.
pub(crate) fn page_bounds(page: Page) -> (i64, i64) {
    (i64::from(page.limit()), i64::from(page.offset()))
}
