// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status vocabularies for tenders, bids and votes.
//!
//! Status values are stored and transmitted as their exact string names.
//! Parsing is case-sensitive; anything outside the vocabulary is rejected
//! with a typed domain error rather than passed through to storage.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TenderStatus {
    /// Freshly created, not yet visible to bidders.
    #[default]
    Created,
    /// Open for bids.
    Published,
    /// Awarded or withdrawn. No further votes are accepted.
    Closed,
}

impl TenderStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Closed => "Closed",
        }
    }

    /// Returns true if this is the closed sentinel.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl FromStr for TenderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "Published" => Ok(Self::Published),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidTenderStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BidStatus {
    /// Draft, visible only to its author.
    #[default]
    Created,
    /// Submitted to the tender owner.
    Published,
    /// Withdrawn by its author.
    Canceled,
}

impl BidStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Canceled => "Canceled",
        }
    }
}

impl FromStr for BidStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "Published" => Ok(Self::Published),
            "Canceled" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidBidStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single representative's vote on a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    #[must_use]
    pub const fn is_approval(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidDecision(s.to_string())),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tender_status_string_round_trip() {
        for status in [
            TenderStatus::Created,
            TenderStatus::Published,
            TenderStatus::Closed,
        ] {
            match TenderStatus::from_str(status.as_str()) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {status}: {e}"),
            }
        }
    }

    #[test]
    fn test_tender_status_is_case_sensitive() {
        assert!(TenderStatus::from_str("closed").is_err());
        assert!(TenderStatus::from_str("CLOSED").is_err());
    }

    #[test]
    fn test_only_closed_is_closed() {
        assert!(TenderStatus::Closed.is_closed());
        assert!(!TenderStatus::Created.is_closed());
        assert!(!TenderStatus::Published.is_closed());
    }

    #[test]
    fn test_invalid_bid_status_reports_value() {
        assert_eq!(
            BidStatus::from_str("Approved"),
            Err(DomainError::InvalidBidStatus {
                status: String::from("Approved"),
            })
        );
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!(Decision::from_str("Approved"), Ok(Decision::Approved));
        assert_eq!(Decision::from_str("Rejected"), Ok(Decision::Rejected));
        assert!(Decision::from_str("Maybe").is_err());
        assert!(Decision::Approved.is_approval());
        assert!(!Decision::Rejected.is_approval());
    }
}
