// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tender_market_domain::Page;

use super::helpers::{bid_id, create_market, place_bid, publish_tender, tender_id};
use crate::{ApiError, list_reviews, submit_feedback};

#[test]
fn test_owner_feedback_is_listed_under_writer() {
    let mut market = create_market(2);
    let tender = publish_tender(&mut market, "Foundations");
    let bid = place_bid(&mut market, &tender, "Offer A");
    let writer = market.owners[0].clone();
    let reader = market.owners[1].clone();

    let returned =
        submit_feedback(&mut market.persistence, &bid_id(&bid), "Too expensive", &writer)
            .unwrap();
    assert_eq!(returned.id, bid.id);

    let reviews = list_reviews(
        &mut market.persistence,
        &tender_id(&tender),
        &writer,
        &reader,
        Page::default(),
    )
    .unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].description, "Too expensive");
}

#[test]
fn test_feedback_requires_tender_owner() {
    let mut market = create_market(1);
    let tender = publish_tender(&mut market, "Foundations");
    let bid = place_bid(&mut market, &tender, "Offer A");
    let bidder = market.bidder.clone();
    let loner = market.loner.clone();

    let err = submit_feedback(&mut market.persistence, &bid_id(&bid), "Great", &bidder)
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));

    let err =
        submit_feedback(&mut market.persistence, &bid_id(&bid), "Great", &loner).unwrap_err();
    assert!(matches!(err, ApiError::NoOrganization { .. }));

    let owner = market.owners[0].clone();
    let err = submit_feedback(&mut market.persistence, &bid_id(&bid), "  ", &owner).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "bidFeedback"));
}

#[test]
fn test_reviews_require_tender_owner() {
    let mut market = create_market(1);
    let tender = publish_tender(&mut market, "Foundations");
    let owner = market.owners[0].clone();
    let bidder = market.bidder.clone();

    let err = list_reviews(
        &mut market.persistence,
        &tender_id(&tender),
        &owner,
        &bidder,
        Page::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));

    let err = list_reviews(
        &mut market.persistence,
        &tender_id(&tender),
        "",
        &owner,
        Page::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "authorUsername"));

    let empty = list_reviews(
        &mut market.persistence,
        &tender_id(&tender),
        "nobody",
        &owner,
        Page::default(),
    )
    .unwrap();
    assert!(empty.is_empty());
}
