// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid mutations. Same versioning rules as tenders.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::data_models::{BidHistoryRow, BidRow};
use crate::diesel_schema::{bid, bid_history};
use crate::error::PersistenceError;
use crate::mutations::{new_id, now_timestamp};
use crate::queries::bids::{get_bid_history_row, get_bid_row};
use tender_market_domain::{Bid, BidId, BidPatch, BidStatus, NewBid};

#[derive(AsChangeset)]
#[diesel(table_name = bid)]
struct BidChangeset<'a> {
    name: Option<&'a str>,
    description: Option<&'a str>,
}

fn snapshot(conn: &mut SqliteConnection, row: &BidRow) -> Result<(), PersistenceError> {
    let history: BidHistoryRow = row.to_history();
    diesel::replace_into(bid_history::table)
        .values(&history)
        .execute(conn)?;
    debug!(bid_id = %row.id, version = row.version, "Bid snapshot written");
    Ok(())
}

/// Creates a bid at version 1 with status `Created`.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if the tender does not exist.
pub fn create_bid(conn: &mut SqliteConnection, new_bid: &NewBid) -> Result<Bid, PersistenceError> {
    let row = BidRow {
        id: new_id(),
        name: new_bid.name.clone(),
        description: new_bid.description.clone(),
        tender_id: new_bid.tender_id.as_str().to_string(),
        status: BidStatus::Created.as_str().to_string(),
        author_type: new_bid.author_type.as_str().to_string(),
        author_id: new_bid.author_id.clone(),
        version: 1,
        created_at: now_timestamp()?,
    };

    diesel::insert_into(bid::table).values(&row).execute(conn)?;

    info!(bid_id = %row.id, tender_id = %row.tender_id, author_id = %row.author_id, "Bid created");
    row.try_into()
}

/// Sets a bid's status.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bid does not exist.
pub fn set_bid_status(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
    status: BidStatus,
) -> Result<Bid, PersistenceError> {
    let row: BidRow = get_bid_row(conn, bid_id)?;
    snapshot(conn, &row)?;

    diesel::update(bid::table.find(bid_id.as_str()))
        .set((
            bid::status.eq(status.as_str()),
            bid::version.eq(bid::version + 1),
        ))
        .execute(conn)?;

    info!(%bid_id, status = status.as_str(), "Bid status changed");
    get_bid_row(conn, bid_id)?.try_into()
}

/// Applies a sparse edit to a bid.
///
/// # Errors
///
/// Returns `NoFieldsToUpdate` for an empty patch, without touching the row,
/// or `NotFound` if the bid does not exist.
pub fn patch_bid(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
    patch: &BidPatch,
) -> Result<Bid, PersistenceError> {
    if patch.is_empty() {
        return Err(PersistenceError::NoFieldsToUpdate);
    }

    let row: BidRow = get_bid_row(conn, bid_id)?;
    snapshot(conn, &row)?;

    let changes = BidChangeset {
        name: patch.name.as_deref(),
        description: patch.description.as_deref(),
    };

    diesel::update(bid::table.find(bid_id.as_str()))
        .set((changes, bid::version.eq(bid::version + 1)))
        .execute(conn)?;

    info!(%bid_id, from_version = row.version, "Bid edited");
    get_bid_row(conn, bid_id)?.try_into()
}

/// Restores a bid to a previous version, keeping the snapshot's `version`
/// and `created_at`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bid or the target version
/// does not exist.
pub fn rollback_bid(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
    version: i32,
) -> Result<Bid, PersistenceError> {
    let current: BidRow = get_bid_row(conn, bid_id)?;
    snapshot(conn, &current)?;
    let target: BidHistoryRow = get_bid_history_row(conn, bid_id, version)?;

    diesel::update(bid::table.find(bid_id.as_str()))
        .set((
            bid::name.eq(&target.name),
            bid::description.eq(&target.description),
            bid::tender_id.eq(&target.tender_id),
            bid::status.eq(&target.status),
            bid::author_type.eq(&target.author_type),
            bid::author_id.eq(&target.author_id),
            bid::version.eq(target.version),
            bid::created_at.eq(&target.created_at),
        ))
        .execute(conn)?;

    info!(%bid_id, from_version = current.version, to_version = version, "Bid rolled back");
    get_bid_row(conn, bid_id)?.try_into()
}
