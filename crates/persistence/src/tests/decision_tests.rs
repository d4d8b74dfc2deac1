// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{Fixture, create_fixture, create_test_bid, create_test_tender};
use crate::PersistenceError;
use tender_market::{Ballot, CoreError, VoteOutcome, WorkflowError, submit_vote};
use tender_market_domain::{Bid, Decision, ServiceType, TenderStatus, UserId};

fn setup(owners: usize) -> (Fixture, Bid) {
    let mut fixture = create_fixture(owners);
    let tender = create_test_tender(&mut fixture, "Bridge", ServiceType::Construction);
    let bid = create_test_bid(&mut fixture, &tender, "Offer");
    (fixture, bid)
}

fn vote(
    fixture: &mut Fixture,
    bid: &Bid,
    voter: &UserId,
    decision: Decision,
) -> Result<VoteOutcome, WorkflowError<PersistenceError>> {
    let ballot = Ballot {
        voter_id: voter.clone(),
        organization_id: fixture.owner_org.clone(),
        tender_id: bid.tender_id.clone(),
        bid_id: bid.id.clone(),
        decision,
    };
    fixture
        .persistence
        .decision_transaction(|ledger| submit_vote(ledger, &ballot))
}

#[test]
fn test_single_approval_closes_tender_and_snapshots() {
    let (mut fixture, bid) = setup(1);
    let voter = fixture.owner_reps[0].1.clone();

    let outcome = vote(&mut fixture, &bid, &voter, Decision::Approved).unwrap();

    assert!(outcome.is_winner);
    let tender = fixture.persistence.get_tender(&bid.tender_id).unwrap();
    assert_eq!(tender.status, TenderStatus::Closed);
    assert_eq!(tender.version, 2);

    // The pre-close version stays restorable.
    let reopened = fixture
        .persistence
        .rollback_tender(&bid.tender_id, 1)
        .unwrap();
    assert_eq!(reopened.status, TenderStatus::Created);
}

#[test]
fn test_three_representatives_need_two_approvals() {
    let (mut fixture, bid) = setup(3);
    let first = fixture.owner_reps[0].1.clone();
    let second = fixture.owner_reps[1].1.clone();

    assert!(!vote(&mut fixture, &bid, &first, Decision::Approved).unwrap().is_winner);
    assert_eq!(
        fixture
            .persistence
            .get_tender_owner_and_status(&bid.tender_id)
            .unwrap()
            .1,
        TenderStatus::Created
    );

    assert!(vote(&mut fixture, &bid, &second, Decision::Approved).unwrap().is_winner);
}

#[test]
fn test_duplicate_vote_is_refused_and_not_counted() {
    let (mut fixture, bid) = setup(3);
    let voter = fixture.owner_reps[0].1.clone();

    vote(&mut fixture, &bid, &voter, Decision::Approved).unwrap();
    let result = vote(&mut fixture, &bid, &voter, Decision::Approved);

    assert_eq!(
        result,
        Err(WorkflowError::Rule(CoreError::AlreadyVoted {
            bid_id: bid.id.clone()
        }))
    );

    let second = fixture.owner_reps[1].1.clone();
    let outcome = vote(&mut fixture, &bid, &second, Decision::Approved).unwrap();
    assert_eq!(outcome.tally.applied, 2);
}

#[test]
fn test_rejection_blocks_bid() {
    let (mut fixture, bid) = setup(3);
    let first = fixture.owner_reps[0].1.clone();
    let second = fixture.owner_reps[1].1.clone();

    vote(&mut fixture, &bid, &first, Decision::Rejected).unwrap();
    let result = vote(&mut fixture, &bid, &second, Decision::Approved);

    assert!(matches!(
        result,
        Err(WorkflowError::Rule(CoreError::BidRejected { .. }))
    ));
}

#[test]
fn test_vote_from_unknown_voter_is_invalid_reference() {
    let (mut fixture, bid) = setup(1);

    let result = vote(&mut fixture, &bid, &UserId::new("ghost"), Decision::Approved);

    assert!(matches!(
        result,
        Err(WorkflowError::Rule(CoreError::InvalidReference { .. }))
    ));
    assert_eq!(
        fixture.persistence.get_tender(&bid.tender_id).unwrap().status,
        TenderStatus::Created
    );
}

#[test]
fn test_failed_body_rolls_back_vote() {
    let (mut fixture, bid) = setup(3);
    let voter = fixture.owner_reps[0].1.clone();
    let ballot = Ballot {
        voter_id: voter.clone(),
        organization_id: fixture.owner_org.clone(),
        tender_id: bid.tender_id.clone(),
        bid_id: bid.id.clone(),
        decision: Decision::Approved,
    };

    let result: Result<(), _> = fixture.persistence.decision_transaction(|ledger| {
        submit_vote(ledger, &ballot)?;
        Err(WorkflowError::Rule(CoreError::Forbidden {
            action: String::from("abort"),
        }))
    });
    assert!(result.is_err());

    // The aborted vote left nothing behind, so the same voter may vote.
    let outcome = vote(&mut fixture, &bid, &voter, Decision::Approved).unwrap();
    assert_eq!(outcome.tally.applied, 1);
}
