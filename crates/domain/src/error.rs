// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A tender or bid name is empty or too long.
    InvalidName(String),
    /// A description exceeds the permitted length.
    InvalidDescription(String),
    /// A username is empty.
    InvalidUsername(String),
    /// Tender status string is not one of the known statuses.
    InvalidTenderStatus {
        /// The rejected value.
        status: String,
    },
    /// Bid status string is not one of the known statuses.
    InvalidBidStatus {
        /// The rejected value.
        status: String,
    },
    /// Service type string is not one of the known service types.
    InvalidServiceType(String),
    /// Author type string is neither organization nor user.
    InvalidAuthorType(String),
    /// Decision string is neither Approved nor Rejected.
    InvalidDecision(String),
    /// Organization type string is not one of the known legal forms.
    InvalidOrganizationType(String),
    /// A rollback target version is not a positive integer.
    InvalidVersion(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidTenderStatus { status } => {
                write!(
                    f,
                    "Invalid tender status '{status}': expected Created, Published or Closed"
                )
            }
            Self::InvalidBidStatus { status } => {
                write!(
                    f,
                    "Invalid bid status '{status}': expected Created, Published or Canceled"
                )
            }
            Self::InvalidServiceType(value) => {
                write!(
                    f,
                    "Invalid service type '{value}': expected Construction, Delivery or Manufacture"
                )
            }
            Self::InvalidAuthorType(value) => {
                write!(
                    f,
                    "Invalid author type '{value}': expected Organization or User"
                )
            }
            Self::InvalidDecision(value) => {
                write!(f, "Invalid decision '{value}': expected Approved or Rejected")
            }
            Self::InvalidOrganizationType(value) => {
                write!(
                    f,
                    "Invalid organization type '{value}': expected IE, LLC or JSC"
                )
            }
            Self::InvalidVersion(version) => {
                write!(f, "Invalid version {version}: versions start at 1")
            }
        }
    }
}

impl std::error::Error for DomainError {}
