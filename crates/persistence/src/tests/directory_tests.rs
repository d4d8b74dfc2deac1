// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_fixture;
use crate::{Persistence, PersistenceError};
use tender_market::{Affiliation, CoreError, WorkflowError, resolve_actor};
use tender_market_domain::{OrganizationId, OrganizationType, UserId};

#[test]
fn test_duplicate_username_is_unique_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.create_employee("alice", None, None).unwrap();

    let result = persistence.create_employee("alice", None, None);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_user_represents_at_most_one_organization() {
    let mut fixture = create_fixture(1);
    let user = fixture.owner_reps[0].1.clone();
    let bidder_org = fixture.bidder_org.clone();

    let result = fixture.persistence.assign_representative(&bidder_org, &user);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_representative_requires_existing_rows() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let org = persistence
        .create_organization("Solo", None, OrganizationType::IE)
        .unwrap();

    let result = persistence.assign_representative(&org.id, &UserId::new("ghost"));

    assert!(matches!(
        result,
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
}

#[test]
fn test_count_representatives() {
    let mut fixture = create_fixture(3);
    let owner_org = fixture.owner_org.clone();

    assert_eq!(fixture.persistence.count_representatives(&owner_org).unwrap(), 3);
    assert_eq!(
        fixture
            .persistence
            .count_representatives(&OrganizationId::new("nobody"))
            .unwrap(),
        0
    );
}

#[test]
fn test_existence_checks() {
    let mut fixture = create_fixture(1);
    let bidder = fixture.bidder.1.clone();
    let bidder_org = fixture.bidder_org.clone();

    assert!(fixture.persistence.employee_exists(&bidder).unwrap());
    assert!(!fixture.persistence.employee_exists(&UserId::new("x")).unwrap());
    assert!(fixture.persistence.organization_exists(&bidder_org).unwrap());
    assert!(
        !fixture
            .persistence
            .organization_exists(&OrganizationId::new("x"))
            .unwrap()
    );
}

#[test]
fn test_resolve_actor_through_store() {
    let mut fixture = create_fixture(1);
    fixture
        .persistence
        .create_employee("loner", None, None)
        .unwrap();

    let owner = resolve_actor(&mut fixture.persistence, "owner0").unwrap();
    assert_eq!(
        owner.affiliation,
        Affiliation::Organization(fixture.owner_org.clone())
    );

    let loner = resolve_actor(&mut fixture.persistence, "loner").unwrap();
    assert_eq!(loner.affiliation, Affiliation::Unaffiliated);

    assert!(matches!(
        resolve_actor(&mut fixture.persistence, "nobody"),
        Err(WorkflowError::Rule(CoreError::UnknownUser { .. }))
    ));
}
