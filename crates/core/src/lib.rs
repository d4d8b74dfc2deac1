// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod decision;
mod error;
mod identity;
mod policy;

#[cfg(test)]
mod tests;

pub use decision::{Ballot, DecisionLedger, RecordOutcome, VoteOutcome, submit_vote};
pub use error::{CoreError, WorkflowError};
pub use identity::{Actor, Affiliation, IdentityDirectory, resolve_actor};
pub use policy::{
    authorize_bid_author, authorize_bid_viewer, authorize_tender_owner, is_author_or_tender_owner,
    is_resource_owner, is_tender_owner_organization,
};
