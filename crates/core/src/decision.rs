// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quorum-based award workflow.
//!
//! Representatives of a tender's owning organization vote on bids. A single
//! rejection blocks a bid for good. Once approvals reach a majority of the
//! organization's current representatives, the tender is closed and the bid
//! is reported as the winner.
//!
//! [`submit_vote`] covers everything after the caller has been authorized:
//! the closed check, the tally, the vote insert and the quorum decision.
//! All of it goes through one [`DecisionLedger`], so a store that runs the
//! ledger inside a single transaction makes the vote and the tender close
//! commit together.

use crate::error::{CoreError, WorkflowError};
use tender_market_domain::{
    BidId, Decision, OrganizationId, TenderId, TenderStatus, UserId, VoteTally, quorum_reached,
};

/// A vote about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    /// The representative casting the vote.
    pub voter_id: UserId,
    /// The voter's organization, which owns the tender.
    pub organization_id: OrganizationId,
    pub tender_id: TenderId,
    pub bid_id: BidId,
    pub decision: Decision,
}

/// Result of trying to insert a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    /// This voter already voted on this bid. Nothing was written.
    AlreadyVoted,
    /// The vote references a tender, bid or voter that does not exist.
    InvalidReference(String),
}

/// Store operations the decision workflow reads and writes.
pub trait DecisionLedger {
    /// The store's error type.
    type Error;

    /// Returns the tender's current status.
    ///
    /// # Errors
    ///
    /// Returns an error if the tender cannot be read.
    fn tender_status(&mut self, tender_id: &TenderId) -> Result<TenderStatus, Self::Error>;

    /// Returns the approval and rejection counts for a bid.
    ///
    /// # Errors
    ///
    /// Returns an error if the votes cannot be counted.
    fn tally(&mut self, bid_id: &BidId) -> Result<VoteTally, Self::Error>;

    /// Inserts a vote, enforcing one vote per voter per bid.
    ///
    /// # Errors
    ///
    /// Returns an error for store failures other than a duplicate vote or a
    /// dangling reference, which are reported through `RecordOutcome`.
    fn record_vote(&mut self, ballot: &Ballot) -> Result<RecordOutcome, Self::Error>;

    /// Counts the organization's representatives.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be counted.
    fn count_representatives(&mut self, organization_id: &OrganizationId)
    -> Result<u32, Self::Error>;

    /// Forces the tender into the closed status.
    ///
    /// # Errors
    ///
    /// Returns an error if the tender cannot be updated.
    fn close_tender(&mut self, tender_id: &TenderId) -> Result<(), Self::Error>;
}

/// What happened when a vote was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// True if this vote closed the tender in favour of the bid.
    pub is_winner: bool,
    /// The tally after the vote was recorded.
    pub tally: VoteTally,
    /// The representative count the quorum was checked against.
    pub representatives: u32,
}

/// Records a vote and applies the quorum rule.
///
/// The caller must already have verified that the voter represents the
/// organization owning the tender.
///
/// # Arguments
///
/// * `ledger` - The vote ledger, ideally scoped to one transaction
/// * `ballot` - The vote to record
///
/// # Errors
///
/// Returns a rule error if:
/// - the tender is already closed (`TenderClosed`)
/// - the bid already has a rejection (`BidRejected`)
/// - the voter already voted on the bid (`AlreadyVoted`)
/// - the vote references missing rows (`InvalidReference`)
///
/// Returns a store error if any ledger call fails.
pub fn submit_vote<L: DecisionLedger>(
    ledger: &mut L,
    ballot: &Ballot,
) -> Result<VoteOutcome, WorkflowError<L::Error>> {
    let status: TenderStatus = ledger
        .tender_status(&ballot.tender_id)
        .map_err(WorkflowError::Store)?;
    if status.is_closed() {
        return Err(CoreError::TenderClosed {
            tender_id: ballot.tender_id.clone(),
        }
        .into());
    }

    let before: VoteTally = ledger.tally(&ballot.bid_id).map_err(WorkflowError::Store)?;
    if before.is_blocked() {
        return Err(CoreError::BidRejected {
            bid_id: ballot.bid_id.clone(),
        }
        .into());
    }

    match ledger.record_vote(ballot).map_err(WorkflowError::Store)? {
        RecordOutcome::Recorded => {}
        RecordOutcome::AlreadyVoted => {
            return Err(CoreError::AlreadyVoted {
                bid_id: ballot.bid_id.clone(),
            }
            .into());
        }
        RecordOutcome::InvalidReference(message) => {
            return Err(CoreError::InvalidReference { message }.into());
        }
    }

    let after: VoteTally = ledger.tally(&ballot.bid_id).map_err(WorkflowError::Store)?;
    let representatives: u32 = ledger
        .count_representatives(&ballot.organization_id)
        .map_err(WorkflowError::Store)?;

    let is_winner: bool = quorum_reached(representatives, after.applied);
    if is_winner {
        ledger
            .close_tender(&ballot.tender_id)
            .map_err(WorkflowError::Store)?;
    }

    Ok(VoteOutcome {
        is_winner,
        tally: after,
        representatives,
    })
}
