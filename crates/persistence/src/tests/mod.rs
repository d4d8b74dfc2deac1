// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod decision_tests;
mod directory_tests;

use crate::Persistence;
use tender_market_domain::{
    AuthorType, Bid, NewBid, NewTender, OrganizationId, OrganizationType, ServiceType, Tender,
    UserId,
};

/// A seeded marketplace: one tender-owning organization with `owners`
/// representatives, and one bidding organization with a single member.
pub struct Fixture {
    pub persistence: Persistence,
    pub owner_org: OrganizationId,
    pub owner_reps: Vec<(String, UserId)>,
    pub bidder_org: OrganizationId,
    pub bidder: (String, UserId),
}

pub fn create_fixture(owners: usize) -> Fixture {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let owner_org = persistence
        .create_organization("Acme", Some("Buys things"), OrganizationType::LLC)
        .unwrap()
        .id;
    let bidder_org = persistence
        .create_organization("Builders", None, OrganizationType::JSC)
        .unwrap()
        .id;

    let mut owner_reps = Vec::new();
    for i in 0..owners {
        let username = format!("owner{i}");
        let employee = persistence.create_employee(&username, None, None).unwrap();
        persistence
            .assign_representative(&owner_org, &employee.id)
            .unwrap();
        owner_reps.push((username, employee.id));
    }

    let bidder = persistence
        .create_employee("bidder", Some("Bea"), Some("Builder"))
        .unwrap();
    persistence
        .assign_representative(&bidder_org, &bidder.id)
        .unwrap();

    Fixture {
        persistence,
        owner_org,
        owner_reps,
        bidder_org,
        bidder: (String::from("bidder"), bidder.id),
    }
}

pub fn create_test_tender(fixture: &mut Fixture, name: &str, service_type: ServiceType) -> Tender {
    let creator = fixture.owner_reps[0].0.clone();
    fixture
        .persistence
        .create_tender(&NewTender {
            name: name.to_string(),
            description: String::from("Tender description"),
            service_type,
            organization_id: fixture.owner_org.clone(),
            creator_username: creator,
        })
        .unwrap()
}

pub fn create_test_bid(fixture: &mut Fixture, tender: &Tender, name: &str) -> Bid {
    let author_id = fixture.bidder_org.as_str().to_string();
    fixture
        .persistence
        .create_bid(&NewBid {
            name: name.to_string(),
            description: String::from("Bid description"),
            tender_id: tender.id.clone(),
            author_type: AuthorType::Organization,
            author_id,
        })
        .unwrap()
}
