// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tender_market_persistence::Persistence;
use tower::ServiceExt;

use crate::seed::{SeedData, apply_seed};
use crate::{AppState, build_router};

/// A router over a seeded in-memory store.
///
/// `owner0..ownerN` represent "Acme Build", `bidder` represents
/// "Bolt Supply" and `loner` represents nobody.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub owner_org: String,
    pub bidder_org: String,
}

pub fn seed_document(owner_count: usize) -> SeedData {
    let mut employees: Vec<Value> = (0..owner_count)
        .map(|i| json!({ "username": format!("owner{i}") }))
        .collect();
    employees.push(json!({ "username": "bidder", "firstName": "Bea" }));
    employees.push(json!({ "username": "loner" }));

    let mut representatives: Vec<Value> = (0..owner_count)
        .map(|i| json!({ "organization": "Acme Build", "username": format!("owner{i}") }))
        .collect();
    representatives.push(json!({ "organization": "Bolt Supply", "username": "bidder" }));

    serde_json::from_value(json!({
        "organizations": [
            { "name": "Acme Build", "description": "General contractor", "type": "LLC" },
            { "name": "Bolt Supply", "type": "JSC" }
        ],
        "employees": employees,
        "representatives": representatives
    }))
    .unwrap()
}

fn organization_of(persistence: &mut Persistence, username: &str) -> String {
    let user_id = persistence
        .find_user_id_by_username(username)
        .unwrap()
        .unwrap();
    persistence
        .find_organization_by_representative(&user_id)
        .unwrap()
        .unwrap()
        .into_inner()
}

pub fn create_test_app(owner_count: usize) -> TestApp {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    apply_seed(&mut persistence, &seed_document(owner_count)).expect("seed applied");
    let owner_org = organization_of(&mut persistence, "owner0");
    let bidder_org = organization_of(&mut persistence, "bidder");

    let state = AppState::new(persistence);
    TestApp {
        app: build_router(state.clone()),
        state,
        owner_org,
        bidder_org,
    }
}

/// Sends one request and decodes the JSON response body.
///
/// Non-JSON bodies decode as `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Creates a tender owned by "Acme Build" and returns its id.
pub async fn create_tender(test: &TestApp, name: &str) -> String {
    let (status, body) = send(
        &test.app,
        "POST",
        "/api/tenders/new",
        Some(json!({
            "name": name,
            "description": "Pour the foundations",
            "serviceType": "Construction",
            "organizationId": test.owner_org,
            "creatorUsername": "owner0"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_str().unwrap().to_string()
}

/// Creates a bid authored by "Bolt Supply" and returns its id.
pub async fn create_bid(test: &TestApp, tender_id: &str, name: &str) -> String {
    let (status, body) = send(
        &test.app,
        "POST",
        "/api/bids/new",
        Some(json!({
            "name": name,
            "description": "Concrete at cost",
            "tenderId": tender_id,
            "authorType": "Organization",
            "authorId": test.bidder_org
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_str().unwrap().to_string()
}
