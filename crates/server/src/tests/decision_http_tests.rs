// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;

use super::helpers::{create_bid, create_tender, create_test_app, send};
use crate::live::MarketEvent;

#[tokio::test]
async fn test_winning_decision_closes_tender_and_announces_award() {
    let test = create_test_app(1);
    let tender_id = create_tender(&test, "Foundations").await;
    let bid_id = create_bid(&test, &tender_id, "Offer A").await;
    let mut events = test.state.live_events.subscribe();

    let (status, body) = send(
        &test.app,
        "PUT",
        &format!("/api/bids/{bid_id}/submit_decision?decision=Approved&username=owner0"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_winner"], true);
    assert_eq!(body["bid"]["id"], bid_id.as_str());

    assert_eq!(
        events.try_recv().unwrap(),
        MarketEvent::DecisionRecorded {
            bid_id: bid_id.clone(),
            decision: String::from("Approved"),
        }
    );
    assert_eq!(
        events.try_recv().unwrap(),
        MarketEvent::TenderAwarded {
            bid_id: bid_id.clone()
        }
    );

    let (_, status_body) = send(
        &test.app,
        "GET",
        &format!("/api/tenders/{tender_id}/status"),
        None,
    )
    .await;
    assert_eq!(status_body, "Closed");

    let other_bid = create_bid(&test, &tender_id, "Offer B").await;
    let (status, _) = send(
        &test.app,
        "PUT",
        &format!("/api/bids/{other_bid}/submit_decision?decision=Approved&username=owner0"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_concurrent_duplicate_decisions_record_one_vote() {
    let test = create_test_app(3);
    let tender_id = create_tender(&test, "Foundations").await;
    let bid_id = create_bid(&test, &tender_id, "Offer A").await;
    let uri = format!("/api/bids/{bid_id}/submit_decision?decision=Approved&username=owner0");

    let ((first, _), (second, _)) = tokio::join!(
        send(&test.app, "PUT", &uri, None),
        send(&test.app, "PUT", &uri, None)
    );
    let mut statuses = vec![first, second];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);

    // Only one approval counted: a second representative's approval is the
    // one that reaches quorum.
    let (status, body) = send(
        &test.app,
        "PUT",
        &format!("/api/bids/{bid_id}/submit_decision?decision=Approved&username=owner1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_winner"], true);
}

#[tokio::test]
async fn test_decision_status_mapping() {
    let test = create_test_app(3);
    let tender_id = create_tender(&test, "Foundations").await;
    let bid_id = create_bid(&test, &tender_id, "Offer A").await;

    let cases = [
        ("Maybe", "owner0", StatusCode::BAD_REQUEST),
        ("Approved", "ghost", StatusCode::UNAUTHORIZED),
        ("Approved", "loner", StatusCode::FORBIDDEN),
        ("Approved", "bidder", StatusCode::FORBIDDEN),
        ("Rejected", "owner0", StatusCode::OK),
        ("Approved", "owner1", StatusCode::CONFLICT),
    ];

    for (decision, username, expected) in cases {
        let (status, body) = send(
            &test.app,
            "PUT",
            &format!("/api/bids/{bid_id}/submit_decision?decision={decision}&username={username}"),
            None,
        )
        .await;
        assert_eq!(status, expected, "{decision} by {username}: {body}");
    }
}
