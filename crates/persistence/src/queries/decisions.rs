// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::diesel_schema::decision;
use crate::error::PersistenceError;
use tender_market_domain::{BidId, Decision, VoteTally};

fn count_votes(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
    kind: Decision,
) -> Result<u32, PersistenceError> {
    let count: i64 = decision::table
        .filter(decision::bid_id.eq(bid_id.as_str()))
        .filter(decision::verdict.eq(kind.as_str()))
        .count()
        .get_result(conn)?;

    count
        .to_u32()
        .ok_or_else(|| PersistenceError::DatabaseError("Vote count conversion failed".to_string()))
}

/// Counts the approvals and rejections recorded for a bid.
///
/// # Errors
///
/// Returns an error if the votes cannot be counted.
pub fn tally_votes(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
) -> Result<VoteTally, PersistenceError> {
    let applied: u32 = count_votes(conn, bid_id, Decision::Approved)?;
    let rejected: u32 = count_votes(conn, bid_id, Decision::Rejected)?;
    Ok(VoteTally::new(applied, rejected))
}
