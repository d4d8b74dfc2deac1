// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{BidHistoryRow, BidOwnership, BidRow};
use crate::diesel_schema::{bid, bid_history};
use crate::error::PersistenceError;
use crate::queries::page_bounds;
use tender_market_domain::{Bid, BidId, OrganizationId, Page, TenderId, UserId};

/// Loads the live row for a bid.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bid does not exist.
pub fn get_bid_row(conn: &mut SqliteConnection, bid_id: &BidId) -> Result<BidRow, PersistenceError> {
    bid::table
        .find(bid_id.as_str())
        .select(BidRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Bid {bid_id}")))
}

/// Loads a bid.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bid does not exist.
pub fn get_bid(conn: &mut SqliteConnection, bid_id: &BidId) -> Result<Bid, PersistenceError> {
    get_bid_row(conn, bid_id)?.try_into()
}

/// Lists the bids made against a tender, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_bids_by_tender(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
    page: Page,
) -> Result<Vec<Bid>, PersistenceError> {
    let (limit, offset) = page_bounds(page);
    debug!(%tender_id, limit, offset, "Listing bids for tender");

    bid::table
        .filter(bid::tender_id.eq(tender_id.as_str()))
        .select(BidRow::as_select())
        .order((bid::name.asc(), bid::id.asc()))
        .limit(limit)
        .offset(offset)
        .load::<BidRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bids_by_tender: {e}")))?
        .into_iter()
        .map(Bid::try_from)
        .collect()
}

/// Lists bids authored by a user or by the user's organization.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_bids_by_author(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    organization_id: Option<&OrganizationId>,
    page: Page,
) -> Result<Vec<Bid>, PersistenceError> {
    let (limit, offset) = page_bounds(page);

    let mut authors: Vec<&str> = vec![user_id.as_str()];
    if let Some(organization_id) = organization_id {
        authors.push(organization_id.as_str());
    }

    bid::table
        .filter(bid::author_id.eq_any(authors))
        .select(BidRow::as_select())
        .order((bid::name.asc(), bid::id.asc()))
        .limit(limit)
        .offset(offset)
        .load::<BidRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bids_by_author: {e}")))?
        .into_iter()
        .map(Bid::try_from)
        .collect()
}

/// Returns the status, tender and author of a bid.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bid does not exist.
pub fn get_bid_status_owner_tender(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
) -> Result<BidOwnership, PersistenceError> {
    let (status, tender_id, author_id): (String, String, String) = bid::table
        .find(bid_id.as_str())
        .select((bid::status, bid::tender_id, bid::author_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Bid {bid_id}")))?;

    Ok(BidOwnership {
        status: status.parse()?,
        tender_id: TenderId::new(tender_id),
        author_id,
    })
}

/// Returns the author id of a bid.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bid does not exist.
pub fn get_bid_author_id(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
) -> Result<String, PersistenceError> {
    bid::table
        .find(bid_id.as_str())
        .select(bid::author_id)
        .first::<String>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Bid {bid_id}")))
}

/// Returns the tender a bid was made against.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the bid does not exist.
pub fn get_bid_tender_id(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
) -> Result<TenderId, PersistenceError> {
    bid::table
        .find(bid_id.as_str())
        .select(bid::tender_id)
        .first::<String>(conn)
        .optional()?
        .map(TenderId::new)
        .ok_or_else(|| PersistenceError::NotFound(format!("Bid {bid_id}")))
}

/// Loads the snapshot of a bid at a version.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no snapshot exists at that version.
pub fn get_bid_history_row(
    conn: &mut SqliteConnection,
    bid_id: &BidId,
    version: i32,
) -> Result<BidHistoryRow, PersistenceError> {
    bid_history::table
        .find((bid_id.as_str(), version))
        .select(BidHistoryRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Bid {bid_id} has no version {version}")))
}
