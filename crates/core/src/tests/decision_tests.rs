// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeLedger, ballot, bid_id, tender_id};
use crate::{Ballot, CoreError, WorkflowError, submit_vote};
use tender_market_domain::{BidId, Decision, TenderStatus, VoteTally};

#[test]
fn test_single_representative_approval_wins() {
    let mut ledger = FakeLedger::new(1);

    let outcome = submit_vote(&mut ledger, &ballot("r1", Decision::Approved)).unwrap();

    assert!(outcome.is_winner);
    assert_eq!(outcome.tally, VoteTally::new(1, 0));
    assert_eq!(ledger.status, TenderStatus::Closed);
    assert_eq!(ledger.close_calls, 1);
}

#[test]
fn test_three_representatives_close_on_second_approval() {
    let mut ledger = FakeLedger::new(3);

    let first = submit_vote(&mut ledger, &ballot("r1", Decision::Approved)).unwrap();
    assert!(!first.is_winner);
    assert_eq!(ledger.status, TenderStatus::Published);

    let second = submit_vote(&mut ledger, &ballot("r2", Decision::Approved)).unwrap();
    assert!(second.is_winner);
    assert_eq!(second.representatives, 3);
    assert_eq!(ledger.status, TenderStatus::Closed);
}

#[test]
fn test_votes_after_close_are_refused() {
    let mut ledger = FakeLedger::new(1);
    submit_vote(&mut ledger, &ballot("r1", Decision::Approved)).unwrap();

    let result = submit_vote(&mut ledger, &ballot("r2", Decision::Approved));

    assert_eq!(
        result,
        Err(WorkflowError::Rule(CoreError::TenderClosed {
            tender_id: tender_id()
        }))
    );
}

#[test]
fn test_rejection_blocks_later_votes() {
    let mut ledger = FakeLedger::new(3);

    let rejected = submit_vote(&mut ledger, &ballot("r1", Decision::Rejected)).unwrap();
    assert!(!rejected.is_winner);
    assert_eq!(rejected.tally, VoteTally::new(0, 1));

    let result = submit_vote(&mut ledger, &ballot("r2", Decision::Approved));

    assert_eq!(
        result,
        Err(WorkflowError::Rule(CoreError::BidRejected { bid_id: bid_id() }))
    );
    assert_eq!(ledger.votes.len(), 1);
}

#[test]
fn test_second_vote_by_same_voter_is_refused() {
    let mut ledger = FakeLedger::new(3);
    submit_vote(&mut ledger, &ballot("r1", Decision::Approved)).unwrap();

    let result = submit_vote(&mut ledger, &ballot("r1", Decision::Approved));

    assert_eq!(
        result,
        Err(WorkflowError::Rule(CoreError::AlreadyVoted { bid_id: bid_id() }))
    );
    assert_eq!(ledger.status, TenderStatus::Published);
}

#[test]
fn test_zero_representatives_closes_on_any_vote() {
    let mut ledger = FakeLedger::new(0);

    let outcome = submit_vote(&mut ledger, &ballot("r1", Decision::Rejected)).unwrap();

    assert!(outcome.is_winner);
    assert_eq!(ledger.status, TenderStatus::Closed);
}

#[test]
fn test_unknown_bid_is_invalid_reference() {
    let mut ledger = FakeLedger::new(2);
    let stray = Ballot {
        bid_id: BidId::new("missing"),
        ..ballot("r1", Decision::Approved)
    };

    let result = submit_vote(&mut ledger, &stray);

    assert!(matches!(
        result,
        Err(WorkflowError::Rule(CoreError::InvalidReference { .. }))
    ));
    assert!(ledger.votes.is_empty());
}

#[test]
fn test_store_failure_surfaces_as_store_error() {
    let mut ledger = FakeLedger::new(1);
    let elsewhere = Ballot {
        tender_id: tender_market_domain::TenderId::new("other"),
        ..ballot("r1", Decision::Approved)
    };

    let result = submit_vote(&mut ledger, &elsewhere);

    assert!(matches!(result, Err(WorkflowError::Store(_))));
}
