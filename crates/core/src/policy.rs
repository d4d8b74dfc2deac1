// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization predicates.
//!
//! The predicates are pure functions over already-resolved facts. The
//! `authorize_*` helpers turn a failed predicate into `CoreError::Forbidden`
//! so that a refusal is always reported and never filtered silently.

use crate::error::CoreError;
use crate::identity::Actor;
use tender_market_domain::{OrganizationId, UserId};

/// Returns true if `resource_owner_id` is the actor's user id or the
/// actor's organization id.
///
/// Bids are authored either by a user or by an organization, so the owner
/// id may come from either identifier space.
#[must_use]
pub fn is_resource_owner(
    actor_user_id: &UserId,
    actor_organization_id: Option<&OrganizationId>,
    resource_owner_id: &str,
) -> bool {
    actor_user_id.as_str() == resource_owner_id
        || actor_organization_id.is_some_and(|org| org.as_str() == resource_owner_id)
}

/// Returns true if the actor's organization owns the tender.
#[must_use]
pub fn is_tender_owner_organization(
    actor_organization_id: Option<&OrganizationId>,
    tender_organization_id: &OrganizationId,
) -> bool {
    actor_organization_id.is_some_and(|org| org == tender_organization_id)
}

/// Returns true if the actor authored the bid or represents the
/// organization that owns the bid's tender.
#[must_use]
pub fn is_author_or_tender_owner(
    actor_user_id: &UserId,
    actor_organization_id: Option<&OrganizationId>,
    bid_author_id: &str,
    tender_owner_organization_id: &OrganizationId,
) -> bool {
    is_resource_owner(actor_user_id, actor_organization_id, bid_author_id)
        || is_tender_owner_organization(actor_organization_id, tender_owner_organization_id)
}

fn forbidden(action: &str) -> CoreError {
    CoreError::Forbidden {
        action: action.to_string(),
    }
}

/// Requires the actor to be the bid's author.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the actor is not the author.
pub fn authorize_bid_author(actor: &Actor, author_id: &str, action: &str) -> Result<(), CoreError> {
    if is_resource_owner(&actor.user_id, actor.organization(), author_id) {
        Ok(())
    } else {
        Err(forbidden(action))
    }
}

/// Requires the actor to represent the tender's owning organization.
///
/// An unaffiliated actor is refused with `Forbidden`. Callers that want
/// `NoOrganization` instead must call `Actor::require_organization` first.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the actor's organization does not own
/// the tender.
pub fn authorize_tender_owner(
    actor: &Actor,
    tender_organization_id: &OrganizationId,
    action: &str,
) -> Result<(), CoreError> {
    if is_tender_owner_organization(actor.organization(), tender_organization_id) {
        Ok(())
    } else {
        Err(forbidden(action))
    }
}

/// Requires the actor to be the bid's author or the tender owner.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if neither holds.
pub fn authorize_bid_viewer(
    actor: &Actor,
    author_id: &str,
    tender_organization_id: &OrganizationId,
    action: &str,
) -> Result<(), CoreError> {
    if is_author_or_tender_owner(
        &actor.user_id,
        actor.organization(),
        author_id,
        tender_organization_id,
    ) {
        Ok(())
    } else {
        Err(forbidden(action))
    }
}
