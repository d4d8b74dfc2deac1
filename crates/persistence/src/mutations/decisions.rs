// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::diesel_schema::decision;
use crate::error::PersistenceError;
use crate::mutations::{new_id, now_timestamp};
use tender_market::Ballot;

/// Inserts a vote.
///
/// # Errors
///
/// Returns `UniqueViolation` if the voter already voted on the bid, or
/// `ForeignKeyViolation` if the vote references missing rows.
pub fn insert_vote(conn: &mut SqliteConnection, ballot: &Ballot) -> Result<(), PersistenceError> {
    diesel::insert_into(decision::table)
        .values((
            decision::id.eq(new_id()),
            decision::voter_id.eq(ballot.voter_id.as_str()),
            decision::organization_id.eq(ballot.organization_id.as_str()),
            decision::tender_id.eq(ballot.tender_id.as_str()),
            decision::bid_id.eq(ballot.bid_id.as_str()),
            decision::verdict.eq(ballot.decision.as_str()),
            decision::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    info!(
        bid_id = %ballot.bid_id,
        voter_id = %ballot.voter_id,
        decision = ballot.decision.as_str(),
        "Vote recorded"
    );
    Ok(())
}
