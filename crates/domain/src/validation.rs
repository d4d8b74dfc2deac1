// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{NewBid, NewTender};

/// Maximum number of characters in a tender or bid name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum number of characters in a tender or bid description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Validates a tender or bid name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank or longer than
/// `MAX_NAME_LEN` characters.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    Ok(())
}

/// Validates a tender or bid description.
///
/// Descriptions may be empty.
///
/// # Errors
///
/// Returns `DomainError::InvalidDescription` if the description is longer
/// than `MAX_DESCRIPTION_LEN` characters.
pub fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::InvalidDescription(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a username supplied by a caller.
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` if the username is blank.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a rollback target version.
///
/// # Errors
///
/// Returns `DomainError::InvalidVersion` if the version is below 1 or does
/// not fit the stored integer width.
pub fn validate_version(version: i64) -> Result<i32, DomainError> {
    match i32::try_from(version) {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(DomainError::InvalidVersion(version)),
    }
}

/// Validates the fields of a tender before creation.
///
/// # Errors
///
/// Returns the first field violation found.
pub fn validate_new_tender(tender: &NewTender) -> Result<(), DomainError> {
    validate_name(&tender.name)?;
    validate_description(&tender.description)?;
    validate_username(&tender.creator_username)?;
    Ok(())
}

/// Validates the fields of a bid before creation.
///
/// Referential checks (tender and author existence) need storage and are
/// performed by the caller.
///
/// # Errors
///
/// Returns the first field violation found.
pub fn validate_new_bid(bid: &NewBid) -> Result<(), DomainError> {
    validate_name(&bid.name)?;
    validate_description(&bid.description)?;
    Ok(())
}
