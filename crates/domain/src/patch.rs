// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field masks for sparse edits.
//!
//! A patch names exactly the fields the caller wants to change. Absent
//! fields are left untouched by the store. A patch with no fields set is
//! rejected before any write happens.

use crate::classification::ServiceType;
use crate::error::DomainError;
use crate::validation::{validate_description, validate_name};
use serde::{Deserialize, Serialize};

/// Sparse edit of a tender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
}

impl TenderPatch {
    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.service_type.is_none()
    }

    /// Validates every field that is present.
    ///
    /// # Errors
    ///
    /// Returns the first field violation found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

/// Sparse edit of a bid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BidPatch {
    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Validates every field that is present.
    ///
    /// # Errors
    ///
    /// Returns the first field violation found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}
