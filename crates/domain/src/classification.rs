// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of work a tender procures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Construction,
    Delivery,
    Manufacture,
}

impl ServiceType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Construction => "Construction",
            Self::Delivery => "Delivery",
            Self::Manufacture => "Manufacture",
        }
    }

    /// Parses a comma-separated filter list such as `"Construction,Delivery"`.
    ///
    /// Empty segments are skipped, so an empty string yields an empty filter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidServiceType` for the first unknown entry.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, DomainError> {
        raw.split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(Self::from_str)
            .collect()
    }
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Construction" => Ok(Self::Construction),
            "Delivery" => Ok(Self::Delivery),
            "Manufacture" => Ok(Self::Manufacture),
            _ => Err(DomainError::InvalidServiceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who authored a bid: a single user or an organization.
///
/// Determines which identifier space a bid's `author_id` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorType {
    Organization,
    User,
}

impl AuthorType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::User => "User",
        }
    }
}

impl FromStr for AuthorType {
    type Err = DomainError;

    /// Parses an author type, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "organization" => Ok(Self::Organization),
            "user" => Ok(Self::User),
            _ => Err(DomainError::InvalidAuthorType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AuthorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Legal form of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum OrganizationType {
    /// Individual entrepreneur.
    IE,
    /// Limited liability company.
    LLC,
    /// Joint-stock company.
    JSC,
}

impl OrganizationType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IE => "IE",
            Self::LLC => "LLC",
            Self::JSC => "JSC",
        }
    }
}

impl FromStr for OrganizationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IE" => Ok(Self::IE),
            "LLC" => Ok(Self::LLC),
            "JSC" => Ok(Self::JSC),
            _ => Err(DomainError::InvalidOrganizationType(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
