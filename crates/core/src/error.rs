// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tender_market_domain::{BidId, DomainError, TenderId};

/// Rule failures raised by identity resolution, authorization and the
/// decision engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No employee exists with this username.
    UnknownUser {
        /// The username that failed to resolve.
        username: String,
    },
    /// The actor represents no organization but the operation needs one.
    NoOrganization {
        /// The resolved username.
        username: String,
    },
    /// An authorization predicate failed.
    Forbidden {
        /// The operation that was refused.
        action: String,
    },
    /// A vote was cast on a tender that is already closed.
    TenderClosed {
        /// The closed tender.
        tender_id: TenderId,
    },
    /// A vote was cast on a bid that already carries a rejection.
    BidRejected {
        /// The blocked bid.
        bid_id: BidId,
    },
    /// The voter already voted on this bid.
    AlreadyVoted {
        /// The bid that was voted on.
        bid_id: BidId,
    },
    /// The ledger refused a vote because it references missing rows.
    InvalidReference {
        /// Description of the dangling reference.
        message: String,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownUser { username } => write!(f, "Unknown user: '{username}'"),
            Self::NoOrganization { username } => {
                write!(f, "User '{username}' does not represent any organization")
            }
            Self::Forbidden { action } => write!(f, "Forbidden: not allowed to {action}"),
            Self::TenderClosed { tender_id } => write!(f, "Tender {tender_id} is closed"),
            Self::BidRejected { bid_id } => {
                write!(f, "Bid {bid_id} has been rejected and cannot receive votes")
            }
            Self::AlreadyVoted { bid_id } => {
                write!(f, "A decision on bid {bid_id} has already been submitted")
            }
            Self::InvalidReference { message } => write!(f, "Invalid reference: {message}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Outcome of a rule-checked operation that also talks to a store.
///
/// Keeps rule failures apart from collaborator failures so callers can
/// translate each side explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError<E> {
    /// A business rule refused the operation.
    Rule(CoreError),
    /// The backing store failed.
    Store(E),
}

impl<E: std::fmt::Display> std::fmt::Display for WorkflowError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rule(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for WorkflowError<E> {}

impl<E> From<CoreError> for WorkflowError<E> {
    fn from(err: CoreError) -> Self {
        Self::Rule(err)
    }
}
