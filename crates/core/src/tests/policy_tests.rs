// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::actor;
use crate::{
    CoreError, authorize_bid_author, authorize_bid_viewer, authorize_tender_owner,
    is_author_or_tender_owner, is_resource_owner, is_tender_owner_organization,
};
use tender_market_domain::{OrganizationId, UserId};

#[test]
fn test_resource_owner_matches_user_or_organization() {
    let user = UserId::new("u1");
    let org = OrganizationId::new("o1");

    assert!(is_resource_owner(&user, Some(&org), "u1"));
    assert!(is_resource_owner(&user, Some(&org), "o1"));
    assert!(!is_resource_owner(&user, Some(&org), "o2"));
    assert!(!is_resource_owner(&user, None, "o1"));
}

#[test]
fn test_tender_owner_requires_matching_organization() {
    let org = OrganizationId::new("o1");

    assert!(is_tender_owner_organization(Some(&org), &org));
    assert!(!is_tender_owner_organization(
        Some(&OrganizationId::new("o2")),
        &org
    ));
    assert!(!is_tender_owner_organization(None, &org));
}

#[test]
fn test_author_or_tender_owner() {
    let user = UserId::new("u1");
    let tender_org = OrganizationId::new("owner");

    assert!(is_author_or_tender_owner(&user, None, "u1", &tender_org));
    assert!(is_author_or_tender_owner(
        &UserId::new("u2"),
        Some(&tender_org),
        "u1",
        &tender_org
    ));
    assert!(!is_author_or_tender_owner(
        &UserId::new("u2"),
        Some(&OrganizationId::new("other")),
        "u1",
        &tender_org
    ));
}

#[test]
fn test_authorize_bid_author_refuses_strangers() {
    let author = actor("alice", Some("org-a"));
    let stranger = actor("eve", Some("org-e"));

    assert!(authorize_bid_author(&author, "user-alice", "edit bid").is_ok());
    assert!(authorize_bid_author(&author, "org-a", "edit bid").is_ok());
    assert_eq!(
        authorize_bid_author(&stranger, "user-alice", "edit bid"),
        Err(CoreError::Forbidden {
            action: String::from("edit bid")
        })
    );
}

#[test]
fn test_authorize_tender_owner_refuses_unaffiliated() {
    let unaffiliated = actor("bob", None);

    assert!(matches!(
        authorize_tender_owner(&unaffiliated, &OrganizationId::new("org-a"), "close tender"),
        Err(CoreError::Forbidden { .. })
    ));
    assert!(
        authorize_tender_owner(
            &actor("alice", Some("org-a")),
            &OrganizationId::new("org-a"),
            "close tender"
        )
        .is_ok()
    );
}

#[test]
fn test_authorize_bid_viewer() {
    let owner_org = OrganizationId::new("owner");

    assert!(authorize_bid_viewer(&actor("carol", Some("owner")), "user-x", &owner_org, "view").is_ok());
    assert!(authorize_bid_viewer(&actor("x", None), "user-x", &owner_org, "view").is_ok());
    assert!(authorize_bid_viewer(&actor("y", None), "user-x", &owner_org, "view").is_err());
}
