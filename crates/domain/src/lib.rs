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

mod classification;
mod error;
mod patch;
mod quorum;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use classification::{AuthorType, OrganizationType, ServiceType};
pub use error::DomainError;
pub use patch::{BidPatch, TenderPatch};
pub use quorum::{VoteTally, quorum_reached};
pub use status::{BidStatus, Decision, TenderStatus};
pub use types::{
    Bid, BidId, Employee, Feedback, FeedbackId, NewBid, NewTender, Organization, OrganizationId,
    Page, Tender, TenderId, UserId,
};
pub use validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_description, validate_name, validate_new_bid,
    validate_new_tender, validate_username, validate_version,
};
