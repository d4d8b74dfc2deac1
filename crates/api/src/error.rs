// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every lower-layer error reaches callers through one of the
//! `translate_*` functions below. Each is an exhaustive `match`, so adding
//! a variant to a lower layer fails to compile until its translation is
//! written down here.

use tender_market::{CoreError, WorkflowError};
use tender_market_domain::DomainError;
use tender_market_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A referenced tender, bid or history version does not exist.
    NotFound {
        /// The kind of resource that was not found.
        resource: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The caller's username does not resolve to an employee.
    UnknownUser {
        /// The username that failed to resolve.
        username: String,
    },
    /// The caller represents no organization but the operation needs one.
    NoOrganization {
        /// The resolved username.
        username: String,
    },
    /// Authorization failed.
    Forbidden {
        /// The action that was attempted.
        action: String,
    },
    /// The voter already voted on this bid.
    AlreadyVoted {
        /// A human-readable description of the duplicate.
        message: String,
    },
    /// The store refused a write because it references missing rows.
    InvalidReference {
        /// A human-readable description of the dangling reference.
        message: String,
    },
    /// A vote was cast on a closed tender.
    TenderClosed {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A vote was cast on a bid that already carries a rejection.
    BidRejected {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// An edit was requested with no fields set.
    NoSuggestionToUpdate,
    /// A status value is not part of the vocabulary.
    InvalidStatus {
        /// A human-readable description of the rejected value.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description safe to show to callers.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, message } => write!(f, "{resource} not found: {message}"),
            Self::UnknownUser { username } => write!(f, "Unknown user: '{username}'"),
            Self::NoOrganization { username } => {
                write!(f, "User '{username}' does not represent any organization")
            }
            Self::Forbidden { action } => write!(f, "Forbidden: not allowed to {action}"),
            Self::AlreadyVoted { message } => write!(f, "Already voted: {message}"),
            Self::InvalidReference { message } => write!(f, "Invalid reference: {message}"),
            Self::TenderClosed { message } => write!(f, "Tender closed: {message}"),
            Self::BidRejected { message } => write!(f, "Bid rejected: {message}"),
            Self::NoSuggestionToUpdate => write!(f, "No fields were supplied to update"),
            Self::InvalidStatus { message } => write!(f, "Invalid status: {message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => invalid_input("name", msg),
        DomainError::InvalidDescription(msg) => invalid_input("description", msg),
        DomainError::InvalidUsername(msg) => invalid_input("username", msg),
        err @ (DomainError::InvalidTenderStatus { .. } | DomainError::InvalidBidStatus { .. }) => {
            ApiError::InvalidStatus {
                message: err.to_string(),
            }
        }
        err @ DomainError::InvalidServiceType(_) => invalid_input("serviceType", err.to_string()),
        err @ DomainError::InvalidAuthorType(_) => invalid_input("authorType", err.to_string()),
        err @ DomainError::InvalidDecision(_) => invalid_input("decision", err.to_string()),
        err @ DomainError::InvalidOrganizationType(_) => {
            invalid_input("organizationType", err.to_string())
        }
        err @ DomainError::InvalidVersion(_) => invalid_input("version", err.to_string()),
    }
}

/// Translates a core rule error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::UnknownUser { username } => ApiError::UnknownUser { username },
        CoreError::NoOrganization { username } => ApiError::NoOrganization { username },
        CoreError::Forbidden { action } => ApiError::Forbidden { action },
        CoreError::TenderClosed { tender_id } => ApiError::TenderClosed {
            message: format!("tender {tender_id} no longer accepts decisions"),
        },
        CoreError::BidRejected { bid_id } => ApiError::BidRejected {
            message: format!("bid {bid_id} has already been rejected"),
        },
        CoreError::AlreadyVoted { bid_id } => ApiError::AlreadyVoted {
            message: format!("a decision on bid {bid_id} was already submitted"),
        },
        CoreError::InvalidReference { message } => ApiError::InvalidReference { message },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures are logged with their detail and surfaced as a generic
/// `Internal` error so no backend text reaches the caller.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::NotFound {
            resource: String::from("Resource"),
            message,
        },
        PersistenceError::NoFieldsToUpdate => ApiError::NoSuggestionToUpdate,
        PersistenceError::UniqueViolation(message)
        | PersistenceError::ForeignKeyViolation(message) => {
            ApiError::InvalidReference { message }
        }
        err @ (PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::CorruptRow(_)
        | PersistenceError::Other(_)) => {
            error!(error = %err, "Storage failure");
            ApiError::Internal {
                message: String::from("storage failure"),
            }
        }
    }
}

/// Translates a persistence error, naming the resource on `NotFound`.
pub(crate) fn translate_lookup_error(resource: &str, err: PersistenceError) -> ApiError {
    match translate_persistence_error(err) {
        ApiError::NotFound { message, .. } => ApiError::NotFound {
            resource: resource.to_string(),
            message,
        },
        other => other,
    }
}

/// Translates a workflow error from identity resolution or the decision
/// engine.
#[must_use]
pub fn translate_workflow_error(err: WorkflowError<PersistenceError>) -> ApiError {
    match err {
        WorkflowError::Rule(core_err) => translate_core_error(core_err),
        WorkflowError::Store(store_err) => translate_persistence_error(store_err),
    }
}
