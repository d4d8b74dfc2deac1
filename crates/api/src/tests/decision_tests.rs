// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tender_market_domain::{BidId, TenderStatus};

use super::helpers::{MISSING_ID, bid_id, create_market, place_bid, publish_tender, tender_id};
use crate::{ApiError, get_tender_status, submit_decision};

#[test]
fn test_single_representative_approval_awards_tender() {
    let mut market = create_market(1);
    let tender = publish_tender(&mut market, "Foundations");
    let bid = place_bid(&mut market, &tender, "Offer A");
    let owner = market.owners[0].clone();

    let response = submit_decision(&mut market.persistence, &bid_id(&bid), "Approved", &owner)
        .unwrap();

    assert!(response.is_winner);
    assert_eq!(response.bid.id, bid.id);
    assert_eq!(
        get_tender_status(&mut market.persistence, &tender_id(&tender)).unwrap(),
        TenderStatus::Closed
    );
}

#[test]
fn test_three_representatives_need_two_approvals() {
    let mut market = create_market(3);
    let tender = publish_tender(&mut market, "Foundations");
    let bid = place_bid(&mut market, &tender, "Offer A");
    let id = bid_id(&bid);
    let first = market.owners[0].clone();
    let second = market.owners[1].clone();

    let response = submit_decision(&mut market.persistence, &id, "Approved", &first).unwrap();
    assert!(!response.is_winner);
    assert_eq!(
        get_tender_status(&mut market.persistence, &tender_id(&tender)).unwrap(),
        TenderStatus::Created
    );

    let response = submit_decision(&mut market.persistence, &id, "Approved", &second).unwrap();
    assert!(response.is_winner);
    assert_eq!(
        get_tender_status(&mut market.persistence, &tender_id(&tender)).unwrap(),
        TenderStatus::Closed
    );
}

#[test]
fn test_second_vote_by_same_representative_is_refused() {
    let mut market = create_market(3);
    let tender = publish_tender(&mut market, "Foundations");
    let bid = place_bid(&mut market, &tender, "Offer A");
    let id = bid_id(&bid);
    let first = market.owners[0].clone();
    let second = market.owners[1].clone();

    submit_decision(&mut market.persistence, &id, "Approved", &first).unwrap();
    let err = submit_decision(&mut market.persistence, &id, "Approved", &first).unwrap_err();
    assert!(matches!(err, ApiError::AlreadyVoted { .. }));

    // The refused vote did not count: one more approval is still needed.
    let response = submit_decision(&mut market.persistence, &id, "Approved", &second).unwrap();
    assert!(response.is_winner);
}

#[test]
fn test_rejection_blocks_later_votes() {
    let mut market = create_market(3);
    let tender = publish_tender(&mut market, "Foundations");
    let bid = place_bid(&mut market, &tender, "Offer A");
    let id = bid_id(&bid);
    let first = market.owners[0].clone();
    let second = market.owners[1].clone();

    let response = submit_decision(&mut market.persistence, &id, "Rejected", &first).unwrap();
    assert!(!response.is_winner);

    let err = submit_decision(&mut market.persistence, &id, "Approved", &second).unwrap_err();
    assert!(matches!(err, ApiError::BidRejected { .. }));
}

#[test]
fn test_closed_tender_refuses_decisions_on_other_bids() {
    let mut market = create_market(1);
    let tender = publish_tender(&mut market, "Foundations");
    let winner = place_bid(&mut market, &tender, "Offer A");
    let other = place_bid(&mut market, &tender, "Offer B");
    let owner = market.owners[0].clone();

    submit_decision(&mut market.persistence, &bid_id(&winner), "Approved", &owner).unwrap();
    let err = submit_decision(&mut market.persistence, &bid_id(&other), "Approved", &owner)
        .unwrap_err();
    assert!(matches!(err, ApiError::TenderClosed { .. }));
}

#[test]
fn test_decision_caller_checks() {
    let mut market = create_market(1);
    let tender = publish_tender(&mut market, "Foundations");
    let bid = place_bid(&mut market, &tender, "Offer A");
    let id = bid_id(&bid);
    let owner = market.owners[0].clone();
    let bidder = market.bidder.clone();
    let loner = market.loner.clone();

    let err = submit_decision(&mut market.persistence, &id, "Maybe", &owner).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "decision"));

    let err = submit_decision(&mut market.persistence, &id, "Approved", "ghost").unwrap_err();
    assert!(matches!(err, ApiError::UnknownUser { .. }));

    let err = submit_decision(&mut market.persistence, &id, "Approved", &loner).unwrap_err();
    assert!(matches!(err, ApiError::NoOrganization { .. }));

    let err = submit_decision(&mut market.persistence, &id, "Approved", &bidder).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));

    let err = submit_decision(
        &mut market.persistence,
        &BidId::new(MISSING_ID),
        "Approved",
        &owner,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));

    // None of the refused calls touched the tender.
    assert_eq!(
        get_tender_status(&mut market.persistence, &tender_id(&tender)).unwrap(),
        TenderStatus::Created
    );
}
