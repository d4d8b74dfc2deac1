// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and organization mutations.
//!
//! The marketplace never edits these records once created. They are written
//! by startup seeding and by tests.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::data_models::{EmployeeRow, OrganizationRow};
use crate::diesel_schema::{employee, organization, organization_responsible};
use crate::error::PersistenceError;
use crate::mutations::{new_id, now_timestamp};
use tender_market_domain::{
    Employee, Organization, OrganizationId, OrganizationType, UserId, validate_username,
};

/// Creates an employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The unique username
/// * `first_name` - Optional first name
/// * `last_name` - Optional last name
///
/// # Errors
///
/// Returns `UniqueViolation` if the username is taken, or `Other` if the
/// username is blank.
pub fn create_employee(
    conn: &mut SqliteConnection,
    username: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<Employee, PersistenceError> {
    validate_username(username).map_err(|e| PersistenceError::Other(e.to_string()))?;

    let row = EmployeeRow {
        id: new_id(),
        username: username.to_string(),
        first_name: first_name.map(ToString::to_string),
        last_name: last_name.map(ToString::to_string),
        created_at: now_timestamp()?,
    };

    diesel::insert_into(employee::table)
        .values(&row)
        .execute(conn)?;

    info!(user_id = %row.id, username, "Employee created");
    Ok(row.into())
}

/// Creates an organization.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn create_organization(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
    organization_type: OrganizationType,
) -> Result<Organization, PersistenceError> {
    let row = OrganizationRow {
        id: new_id(),
        name: name.to_string(),
        description: description.map(ToString::to_string),
        organization_type: organization_type.as_str().to_string(),
        created_at: now_timestamp()?,
    };

    diesel::insert_into(organization::table)
        .values(&row)
        .execute(conn)?;

    info!(organization_id = %row.id, name, "Organization created");
    row.try_into()
}

/// Makes a user a representative of an organization.
///
/// # Errors
///
/// Returns `UniqueViolation` if the user already represents an organization,
/// or `ForeignKeyViolation` if either side does not exist.
pub fn assign_representative(
    conn: &mut SqliteConnection,
    organization_id: &OrganizationId,
    user_id: &UserId,
) -> Result<(), PersistenceError> {
    diesel::insert_into(organization_responsible::table)
        .values((
            organization_responsible::id.eq(new_id()),
            organization_responsible::organization_id.eq(organization_id.as_str()),
            organization_responsible::user_id.eq(user_id.as_str()),
        ))
        .execute(conn)?;

    info!(%organization_id, %user_id, "Representative assigned");
    Ok(())
}
