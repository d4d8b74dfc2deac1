// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeDirectory, FakeStoreError};
use crate::{Affiliation, CoreError, WorkflowError, resolve_actor};
use tender_market_domain::{OrganizationId, UserId};

#[test]
fn test_resolves_representative() {
    let mut directory = FakeDirectory::default().with_user("alice", Some("org-a"));

    let actor = resolve_actor(&mut directory, "alice").unwrap();

    assert_eq!(actor.user_id, UserId::new("user-alice"));
    assert_eq!(
        actor.affiliation,
        Affiliation::Organization(OrganizationId::new("org-a"))
    );
    assert_eq!(actor.organization(), Some(&OrganizationId::new("org-a")));
}

#[test]
fn test_resolves_unaffiliated_user() {
    let mut directory = FakeDirectory::default().with_user("bob", None);

    let actor = resolve_actor(&mut directory, "bob").unwrap();

    assert_eq!(actor.affiliation, Affiliation::Unaffiliated);
    assert!(actor.organization().is_none());
    assert!(matches!(
        actor.require_organization(),
        Err(CoreError::NoOrganization { username }) if username == "bob"
    ));
}

#[test]
fn test_unknown_username_is_rejected() {
    let mut directory = FakeDirectory::default().with_user("alice", Some("org-a"));

    let result = resolve_actor(&mut directory, "mallory");

    assert_eq!(
        result,
        Err(WorkflowError::Rule(CoreError::UnknownUser {
            username: String::from("mallory")
        }))
    );
}

#[test]
fn test_blank_username_never_reaches_directory() {
    let mut directory = FakeDirectory {
        fail: true,
        ..FakeDirectory::default()
    };

    let result = resolve_actor(&mut directory, "   ");

    assert!(matches!(
        result,
        Err(WorkflowError::Rule(CoreError::UnknownUser { .. }))
    ));
}

#[test]
fn test_directory_failure_is_a_store_error() {
    let mut directory = FakeDirectory {
        fail: true,
        ..FakeDirectory::default()
    };

    let result = resolve_actor(&mut directory, "alice");

    assert_eq!(
        result,
        Err(WorkflowError::Store(FakeStoreError(String::from(
            "directory offline"
        ))))
    );
}
