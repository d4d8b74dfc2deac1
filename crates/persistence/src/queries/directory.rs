// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and organization lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::diesel_schema::{employee, organization, organization_responsible};
use crate::error::PersistenceError;
use tender_market_domain::{OrganizationId, UserId};

/// Finds the user id for a username.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no employee has this username.
pub fn find_user_id_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserId>, PersistenceError> {
    debug!(username, "Looking up employee by username");

    employee::table
        .filter(employee::username.eq(username))
        .select(employee::id)
        .first::<String>(conn)
        .optional()
        .map(|id| id.map(UserId::new))
        .map_err(|e| PersistenceError::QueryFailed(format!("find_user_id_by_username: {e}")))
}

/// Finds the organization a user represents.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user represents no organization.
pub fn find_organization_by_representative(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<Option<OrganizationId>, PersistenceError> {
    organization_responsible::table
        .filter(organization_responsible::user_id.eq(user_id.as_str()))
        .select(organization_responsible::organization_id)
        .first::<String>(conn)
        .optional()
        .map(|id| id.map(OrganizationId::new))
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("find_organization_by_representative: {e}"))
        })
}

/// Counts the representatives of an organization.
///
/// # Errors
///
/// Returns an error if the query fails or the count does not fit a `u32`.
pub fn count_representatives(
    conn: &mut SqliteConnection,
    organization_id: &OrganizationId,
) -> Result<u32, PersistenceError> {
    let count: i64 = organization_responsible::table
        .filter(organization_responsible::organization_id.eq(organization_id.as_str()))
        .count()
        .get_result(conn)?;

    count.to_u32().ok_or_else(|| {
        PersistenceError::DatabaseError("Representative count conversion failed".to_string())
    })
}

/// Returns true if an employee with this id exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn employee_exists(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        employee::table.filter(employee::id.eq(user_id.as_str())),
    ))
    .get_result(conn)?)
}

/// Returns true if an organization with this id exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn organization_exists(
    conn: &mut SqliteConnection,
    organization_id: &OrganizationId,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        organization::table.filter(organization::id.eq(organization_id.as_str())),
    ))
    .get_result(conn)?)
}
