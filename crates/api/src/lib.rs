// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender and bid workflows.
//!
//! Each public workflow function takes the store, resolves the caller,
//! applies the authorization policy and performs one store operation.
//! Failures from every lower layer are translated into `ApiError` before
//! they leave this crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod bids;
mod error;
mod request_response;
mod tenders;

#[cfg(test)]
mod tests;

pub use bids::{
    create_bid, edit_bid, get_bid_status, list_bids_for_tender, list_my_bids, list_reviews,
    rollback_bid, submit_decision, submit_feedback, update_bid_status,
};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_workflow_error,
};
pub use request_response::{
    BidResponse, CreateBidRequest, CreateTenderRequest, DecisionResponse, EditBidRequest,
    EditTenderRequest, FeedbackResponse, TenderResponse,
};
pub use tenders::{
    create_tender, edit_tender, get_tender_status, list_my_tenders, list_tenders,
    rollback_tender, update_tender_status,
};

use tender_market::{Actor, resolve_actor};
use tender_market_domain::{BidId, TenderId};
use tender_market_persistence::Persistence;

/// Parses a tender id supplied by a caller.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the value is not a UUID.
pub fn parse_tender_id(raw: &str) -> Result<TenderId, ApiError> {
    parse_uuid("tenderId", raw).map(TenderId::new)
}

/// Parses a bid id supplied by a caller.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the value is not a UUID.
pub fn parse_bid_id(raw: &str) -> Result<BidId, ApiError> {
    parse_uuid("bidId", raw).map(BidId::new)
}

/// Checks that `raw` is a UUID and returns it unchanged.
pub(crate) fn parse_uuid(field: &str, raw: &str) -> Result<String, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map(|_| raw.to_string())
        .map_err(|e| ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("'{raw}' is not a valid UUID: {e}"),
        })
}

/// Resolves the caller's username into an actor.
pub(crate) fn resolve(persistence: &mut Persistence, username: &str) -> Result<Actor, ApiError> {
    resolve_actor(persistence, username).map_err(translate_workflow_error)
}
