// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use tender_market_domain::{BidId, OrganizationId, OrganizationType, TenderId, UserId};
use tender_market_persistence::Persistence;

use crate::{
    BidResponse, CreateBidRequest, CreateTenderRequest, TenderResponse, create_bid, create_tender,
};

/// A directory with two organizations and one unaffiliated user.
///
/// `owners` represent `owner_org`, which publishes tenders. `bidder`
/// represents `bidder_org`, which authors bids. `loner` represents nobody.
pub struct Market {
    pub persistence: Persistence,
    pub owner_org: OrganizationId,
    pub owners: Vec<String>,
    pub bidder_org: OrganizationId,
    pub bidder: String,
    pub bidder_id: UserId,
    pub loner: String,
    pub loner_id: UserId,
}

/// Builds a market whose tender-owning organization has `owner_count`
/// representatives, named `owner0`, `owner1`, ...
pub fn create_market(owner_count: usize) -> Market {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let owner_org = persistence
        .create_organization("Acme Build", Some("General contractor"), OrganizationType::LLC)
        .expect("owner organization")
        .id;
    let bidder_org = persistence
        .create_organization("Bolt Supply", None, OrganizationType::JSC)
        .expect("bidder organization")
        .id;

    let mut owners = Vec::new();
    for i in 0..owner_count {
        let username = format!("owner{i}");
        let employee = persistence
            .create_employee(&username, Some("Owner"), None)
            .expect("owner employee");
        persistence
            .assign_representative(&owner_org, &employee.id)
            .expect("owner representative");
        owners.push(username);
    }

    let bidder = persistence
        .create_employee("bidder", Some("Bea"), Some("Bidder"))
        .expect("bidder employee");
    persistence
        .assign_representative(&bidder_org, &bidder.id)
        .expect("bidder representative");

    let loner = persistence
        .create_employee("loner", None, None)
        .expect("unaffiliated employee");

    Market {
        persistence,
        owner_org,
        owners,
        bidder_org,
        bidder: bidder.username,
        bidder_id: bidder.id,
        loner: loner.username,
        loner_id: loner.id,
    }
}

pub fn tender_request(market: &Market, name: &str) -> CreateTenderRequest {
    CreateTenderRequest {
        name: name.to_string(),
        description: String::from("Pour the foundations"),
        service_type: String::from("Construction"),
        organization_id: market.owner_org.to_string(),
        creator_username: market.owners[0].clone(),
    }
}

/// Creates a tender owned by `owner_org`, created by `owner0`.
pub fn publish_tender(market: &mut Market, name: &str) -> TenderResponse {
    let request = tender_request(market, name);
    create_tender(&mut market.persistence, request).expect("tender created")
}

/// Creates a bid authored by `bidder_org`.
pub fn place_bid(market: &mut Market, tender: &TenderResponse, name: &str) -> BidResponse {
    let request = CreateBidRequest {
        name: name.to_string(),
        description: String::from("Concrete at cost"),
        tender_id: tender.id.clone(),
        author_type: String::from("Organization"),
        author_id: market.bidder_org.to_string(),
    };
    create_bid(&mut market.persistence, request).expect("bid created")
}

pub fn tender_id(tender: &TenderResponse) -> TenderId {
    TenderId::new(tender.id.clone())
}

pub fn bid_id(bid: &BidResponse) -> BidId {
    BidId::new(bid.id.clone())
}

/// A syntactically valid id that names nothing.
pub const MISSING_ID: &str = "00000000-0000-4000-8000-000000000000";
