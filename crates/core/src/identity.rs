// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity resolution.
//!
//! Every inbound operation names its caller by username. Resolution turns
//! that username into an [`Actor`]: a user id plus the organization the user
//! represents, if any.
//!
//! The three outcomes are kept distinct:
//!
//! - the username is unknown, which fails resolution outright
//! - the user represents an organization
//! - the user represents no organization
//!
//! An unaffiliated actor is a valid caller. Each operation decides for itself
//! whether that is acceptable, by calling either [`Actor::organization`]
//! (optional) or [`Actor::require_organization`] (mandatory).

use crate::error::{CoreError, WorkflowError};
use tender_market_domain::{OrganizationId, UserId};

/// Lookup operations identity resolution needs from a store.
pub trait IdentityDirectory {
    /// The store's error type.
    type Error;

    /// Finds the user id for a username.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried. An unknown username
    /// is `Ok(None)`, not an error.
    fn find_user_id(&mut self, username: &str) -> Result<Option<UserId>, Self::Error>;

    /// Finds the organization a user represents.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried. A user with no
    /// representative mapping is `Ok(None)`.
    fn find_organization(
        &mut self,
        user_id: &UserId,
    ) -> Result<Option<OrganizationId>, Self::Error>;
}

/// Whether an actor acts on behalf of an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affiliation {
    /// The actor is a representative of this organization.
    Organization(OrganizationId),
    /// The actor represents no organization.
    Unaffiliated,
}

/// A resolved caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: String,
    pub user_id: UserId,
    pub affiliation: Affiliation,
}

impl Actor {
    /// Creates an actor from already-resolved facts.
    #[must_use]
    pub const fn new(username: String, user_id: UserId, affiliation: Affiliation) -> Self {
        Self {
            username,
            user_id,
            affiliation,
        }
    }

    /// Returns the represented organization, if any.
    #[must_use]
    pub const fn organization(&self) -> Option<&OrganizationId> {
        match &self.affiliation {
            Affiliation::Organization(id) => Some(id),
            Affiliation::Unaffiliated => None,
        }
    }

    /// Returns the represented organization, failing if there is none.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoOrganization` for an unaffiliated actor.
    pub fn require_organization(&self) -> Result<&OrganizationId, CoreError> {
        self.organization().ok_or_else(|| CoreError::NoOrganization {
            username: self.username.clone(),
        })
    }
}

/// Resolves a username into an [`Actor`].
///
/// # Arguments
///
/// * `directory` - The identity store
/// * `username` - The caller's username
///
/// # Errors
///
/// Returns `CoreError::UnknownUser` if no employee has this username, or a
/// store error if the directory cannot be queried.
pub fn resolve_actor<D: IdentityDirectory>(
    directory: &mut D,
    username: &str,
) -> Result<Actor, WorkflowError<D::Error>> {
    let unknown = || CoreError::UnknownUser {
        username: username.to_string(),
    };

    if username.trim().is_empty() {
        return Err(unknown().into());
    }

    let user_id: UserId = directory
        .find_user_id(username)
        .map_err(WorkflowError::Store)?
        .ok_or_else(unknown)?;

    let affiliation: Affiliation = match directory
        .find_organization(&user_id)
        .map_err(WorkflowError::Store)?
    {
        Some(organization_id) => Affiliation::Organization(organization_id),
        None => Affiliation::Unaffiliated,
    };

    Ok(Actor::new(username.to_string(), user_id, affiliation))
}
