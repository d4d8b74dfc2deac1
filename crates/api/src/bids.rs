// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid workflow, including decisions and feedback.

use tender_market::{
    Actor, Ballot, VoteOutcome, authorize_bid_author, authorize_bid_viewer,
    authorize_tender_owner, submit_vote,
};
use tender_market_domain::{
    AuthorType, BidId, BidPatch, BidStatus, Decision, NewBid, OrganizationId, Page, TenderId,
    UserId, validate_description, validate_new_bid, validate_username, validate_version,
};
use tender_market_persistence::{BidOwnership, Persistence, PersistenceError};
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_lookup_error,
    translate_persistence_error, translate_workflow_error,
};
use crate::request_response::{
    BidResponse, CreateBidRequest, DecisionResponse, EditBidRequest, FeedbackResponse,
};
use crate::{parse_uuid, resolve};

// ============================================================================
// Shared checks
// ============================================================================

/// Resolves the caller and checks that they authored the bid.
fn resolve_bid_author(
    persistence: &mut Persistence,
    bid_id: &BidId,
    username: &str,
    action: &str,
) -> Result<Actor, ApiError> {
    let actor: Actor = resolve(persistence, username)?;
    let author_id: String = persistence
        .get_bid_author_id(bid_id)
        .map_err(|e| translate_lookup_error("Bid", e))?;
    authorize_bid_author(&actor, &author_id, action).map_err(translate_core_error)?;
    Ok(actor)
}

/// Requires the actor to represent the organization owning `tender_id`.
/// Returns that organization's id.
fn require_tender_representative(
    persistence: &mut Persistence,
    actor: &Actor,
    tender_id: &TenderId,
    action: &str,
) -> Result<OrganizationId, ApiError> {
    let organization_id: OrganizationId = actor
        .require_organization()
        .map_err(translate_core_error)?
        .clone();

    let (owner, _status) = persistence
        .get_tender_owner_and_status(tender_id)
        .map_err(|e| translate_lookup_error("Tender", e))?;
    authorize_tender_owner(actor, &owner, action).map_err(translate_core_error)?;

    Ok(organization_id)
}

// ============================================================================
// Bids
// ============================================================================

/// Creates a bid.
///
/// This function:
/// - Validates the request fields
/// - Requires the tender to exist
/// - Requires the author to exist as a user or organization, per `author_type`
/// - Stores the bid at version 1 with status `Created`
///
/// No caller identity is involved; the author is named in the request.
///
/// # Errors
///
/// Returns `InvalidInput` if a field is invalid, the tender does not exist
/// or the author does not exist.
pub fn create_bid(
    persistence: &mut Persistence,
    request: CreateBidRequest,
) -> Result<BidResponse, ApiError> {
    let author_type: AuthorType = request
        .author_type
        .parse()
        .map_err(translate_domain_error)?;
    let tender_id = TenderId::new(parse_uuid("tenderId", &request.tender_id)?);
    let author_id: String = parse_uuid("authorId", &request.author_id)?;

    let new_bid = NewBid {
        name: request.name,
        description: request.description,
        tender_id,
        author_type,
        author_id,
    };
    validate_new_bid(&new_bid).map_err(translate_domain_error)?;

    match persistence.get_tender_owner_and_status(&new_bid.tender_id) {
        Ok(_) => {}
        Err(PersistenceError::NotFound(_)) => {
            return Err(ApiError::InvalidInput {
                field: String::from("tenderId"),
                message: format!("tender {} does not exist", new_bid.tender_id),
            });
        }
        Err(e) => return Err(translate_persistence_error(e)),
    }

    let author_exists: bool = match new_bid.author_type {
        AuthorType::User => persistence.employee_exists(&UserId::new(new_bid.author_id.clone())),
        AuthorType::Organization => {
            persistence.organization_exists(&OrganizationId::new(new_bid.author_id.clone()))
        }
    }
    .map_err(translate_persistence_error)?;
    if !author_exists {
        return Err(ApiError::InvalidInput {
            field: String::from("authorId"),
            message: format!(
                "no {} with id {} exists",
                new_bid.author_type.as_str().to_lowercase(),
                new_bid.author_id
            ),
        });
    }

    let bid = persistence
        .create_bid(&new_bid)
        .map_err(translate_persistence_error)?;

    info!(
        bid_id = %bid.id,
        tender_id = %bid.tender_id,
        author_type = %bid.author_type,
        author_id = %bid.author_id,
        "Created bid"
    );
    Ok(bid.into())
}

/// Lists bids authored by the caller or the caller's organization.
///
/// Unaffiliated callers are allowed and see only bids they authored
/// personally.
///
/// # Errors
///
/// Returns `UnknownUser` if the username does not resolve.
pub fn list_my_bids(
    persistence: &mut Persistence,
    username: &str,
    page: Page,
) -> Result<Vec<BidResponse>, ApiError> {
    let actor: Actor = resolve(persistence, username)?;
    let bids = persistence
        .list_bids_by_author(&actor.user_id, actor.organization(), page)
        .map_err(translate_persistence_error)?;

    debug!(username = %actor.username, count = bids.len(), "Listed own bids");
    Ok(bids.into_iter().map(BidResponse::from).collect())
}

/// Lists the bids placed on a tender, for the tender's owner.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is unknown (`UnknownUser`)
/// - The caller represents no organization (`Forbidden`)
/// - The tender does not exist (`NotFound`)
/// - The caller's organization does not own the tender (`Forbidden`)
pub fn list_bids_for_tender(
    persistence: &mut Persistence,
    tender_id: &TenderId,
    username: &str,
    page: Page,
) -> Result<Vec<BidResponse>, ApiError> {
    const ACTION: &str = "list bids for this tender";

    let actor: Actor = resolve(persistence, username)?;
    // An unaffiliated caller cannot own any tender, so this is a refusal
    // rather than a missing-organization error.
    if actor.organization().is_none() {
        return Err(ApiError::Forbidden {
            action: ACTION.to_string(),
        });
    }

    let (owner, _status) = persistence
        .get_tender_owner_and_status(tender_id)
        .map_err(|e| translate_lookup_error("Tender", e))?;
    authorize_tender_owner(&actor, &owner, ACTION).map_err(translate_core_error)?;

    let bids = persistence
        .list_bids_by_tender(tender_id, page)
        .map_err(translate_persistence_error)?;

    debug!(tender_id = %tender_id, count = bids.len(), "Listed tender bids");
    Ok(bids.into_iter().map(BidResponse::from).collect())
}

/// Returns a bid's status to its author or to the tender owner.
///
/// # Errors
///
/// Returns `UnknownUser`, `NotFound` or `Forbidden`.
pub fn get_bid_status(
    persistence: &mut Persistence,
    bid_id: &BidId,
    username: &str,
) -> Result<BidStatus, ApiError> {
    let actor: Actor = resolve(persistence, username)?;
    let ownership: BidOwnership = persistence
        .get_bid_status_owner_tender(bid_id)
        .map_err(|e| translate_lookup_error("Bid", e))?;
    let (tender_owner, _status) = persistence
        .get_tender_owner_and_status(&ownership.tender_id)
        .map_err(|e| translate_lookup_error("Tender", e))?;

    authorize_bid_viewer(
        &actor,
        &ownership.author_id,
        &tender_owner,
        "view this bid's status",
    )
    .map_err(translate_core_error)?;

    Ok(ownership.status)
}

/// Changes a bid's status. Only the author may do this.
///
/// # Errors
///
/// Returns `InvalidStatus`, `UnknownUser`, `NotFound` or `Forbidden`.
pub fn update_bid_status(
    persistence: &mut Persistence,
    bid_id: &BidId,
    status: &str,
    username: &str,
) -> Result<BidResponse, ApiError> {
    let status: BidStatus = status.parse().map_err(translate_domain_error)?;
    let actor = resolve_bid_author(persistence, bid_id, username, "change this bid's status")?;

    let bid = persistence
        .set_bid_status(bid_id, status)
        .map_err(|e| translate_lookup_error("Bid", e))?;

    info!(
        bid_id = %bid.id,
        status = %bid.status,
        version = bid.version,
        username = %actor.username,
        "Changed bid status"
    );
    Ok(bid.into())
}

/// Applies a sparse edit to a bid. Only the author may do this.
///
/// # Errors
///
/// Returns an error if:
/// - A supplied field is invalid (`InvalidInput`)
/// - The caller is unknown (`UnknownUser`)
/// - The bid does not exist (`NotFound`)
/// - The caller is not the author (`Forbidden`)
/// - No field was supplied (`NoSuggestionToUpdate`)
pub fn edit_bid(
    persistence: &mut Persistence,
    bid_id: &BidId,
    request: EditBidRequest,
    username: &str,
) -> Result<BidResponse, ApiError> {
    let patch = BidPatch {
        name: request.name,
        description: request.description,
    };
    patch.validate().map_err(translate_domain_error)?;

    let actor = resolve_bid_author(persistence, bid_id, username, "edit this bid")?;

    let bid = persistence
        .patch_bid(bid_id, &patch)
        .map_err(|e| translate_lookup_error("Bid", e))?;

    info!(
        bid_id = %bid.id,
        version = bid.version,
        username = %actor.username,
        "Edited bid"
    );
    Ok(bid.into())
}

/// Restores a bid to an earlier version. Only the author may do this.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive version, `UnknownUser`,
/// `Forbidden`, or `NotFound` if the bid or the version does not exist.
pub fn rollback_bid(
    persistence: &mut Persistence,
    bid_id: &BidId,
    version: i64,
    username: &str,
) -> Result<BidResponse, ApiError> {
    let version: i32 = validate_version(version).map_err(translate_domain_error)?;
    let actor = resolve_bid_author(persistence, bid_id, username, "roll back this bid")?;

    let bid = persistence
        .rollback_bid(bid_id, version)
        .map_err(|e| translate_lookup_error("Bid version", e))?;

    info!(
        bid_id = %bid.id,
        version = bid.version,
        username = %actor.username,
        "Rolled back bid"
    );
    Ok(bid.into())
}

// ============================================================================
// Decisions
// ============================================================================

/// Records a tender owner's decision on a bid.
///
/// This function:
/// - Resolves the voter and requires an organization
/// - Requires the voter's organization to own the bid's tender
/// - Runs the vote and quorum check in one immediate transaction
///
/// When the vote reaches quorum the tender is closed in the same
/// transaction and `is_winner` is true.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `bid_id` - The bid being decided on
/// * `decision` - `Approved` or `Rejected`
/// * `username` - The voting representative
///
/// # Errors
///
/// Returns an error if:
/// - The decision is unknown (`InvalidInput`)
/// - The voter is unknown or unaffiliated (`UnknownUser`, `NoOrganization`)
/// - The bid or its tender does not exist (`NotFound`)
/// - The voter's organization does not own the tender (`Forbidden`)
/// - The tender is closed (`TenderClosed`)
/// - The bid was already rejected (`BidRejected`)
/// - The voter already voted on the bid (`AlreadyVoted`)
pub fn submit_decision(
    persistence: &mut Persistence,
    bid_id: &BidId,
    decision: &str,
    username: &str,
) -> Result<DecisionResponse, ApiError> {
    let decision: Decision = decision.parse().map_err(translate_domain_error)?;

    let actor: Actor = resolve(persistence, username)?;
    let tender_id: TenderId = persistence
        .get_bid_tender_id(bid_id)
        .map_err(|e| translate_lookup_error("Bid", e))?;
    let organization_id = require_tender_representative(
        persistence,
        &actor,
        &tender_id,
        "decide on bids for this tender",
    )?;

    let ballot = Ballot {
        voter_id: actor.user_id.clone(),
        organization_id,
        tender_id,
        bid_id: bid_id.clone(),
        decision,
    };

    let outcome: VoteOutcome = persistence
        .decision_transaction(|ledger| submit_vote(ledger, &ballot))
        .map_err(translate_workflow_error)?;

    info!(
        bid_id = %ballot.bid_id,
        tender_id = %ballot.tender_id,
        voter = %actor.username,
        decision = %ballot.decision,
        applied = outcome.tally.applied,
        rejected = outcome.tally.rejected,
        representatives = outcome.representatives,
        is_winner = outcome.is_winner,
        "Recorded decision"
    );

    let bid = persistence
        .get_bid(bid_id)
        .map_err(|e| translate_lookup_error("Bid", e))?;

    Ok(DecisionResponse {
        bid: bid.into(),
        is_winner: outcome.is_winner,
    })
}

// ============================================================================
// Feedback
// ============================================================================

/// Leaves feedback on a bid, as a representative of the tender owner.
///
/// The feedback is stored under the writer's username and is not linked
/// to the bid.
///
/// # Errors
///
/// Returns an error if:
/// - The feedback text is empty or too long (`InvalidInput`)
/// - The caller is unknown or unaffiliated (`UnknownUser`, `NoOrganization`)
/// - The bid does not exist (`NotFound`)
/// - The caller's organization does not own the bid's tender (`Forbidden`)
pub fn submit_feedback(
    persistence: &mut Persistence,
    bid_id: &BidId,
    feedback: &str,
    username: &str,
) -> Result<BidResponse, ApiError> {
    if feedback.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("bidFeedback"),
            message: String::from("Feedback cannot be empty"),
        });
    }
    validate_description(feedback).map_err(|e| ApiError::InvalidInput {
        field: String::from("bidFeedback"),
        message: e.to_string(),
    })?;

    let actor: Actor = resolve(persistence, username)?;
    let tender_id: TenderId = persistence
        .get_bid_tender_id(bid_id)
        .map_err(|e| translate_lookup_error("Bid", e))?;
    require_tender_representative(
        persistence,
        &actor,
        &tender_id,
        "leave feedback on this bid",
    )?;

    let entry = persistence
        .append_feedback(&actor.username, feedback)
        .map_err(translate_persistence_error)?;

    info!(
        feedback_id = %entry.id,
        bid_id = %bid_id,
        username = %actor.username,
        "Recorded feedback"
    );

    let bid = persistence
        .get_bid(bid_id)
        .map_err(|e| translate_lookup_error("Bid", e))?;
    Ok(bid.into())
}

/// Lists the feedback written by `author_username`, for a representative
/// of the tender's owning organization.
///
/// An author with no feedback yields an empty list.
///
/// # Errors
///
/// Returns an error if:
/// - The author username is empty (`InvalidInput`)
/// - The requester is unknown or unaffiliated (`UnknownUser`, `NoOrganization`)
/// - The tender does not exist (`NotFound`)
/// - The requester's organization does not own the tender (`Forbidden`)
pub fn list_reviews(
    persistence: &mut Persistence,
    tender_id: &TenderId,
    author_username: &str,
    requester_username: &str,
    page: Page,
) -> Result<Vec<FeedbackResponse>, ApiError> {
    validate_username(author_username).map_err(|e| ApiError::InvalidInput {
        field: String::from("authorUsername"),
        message: e.to_string(),
    })?;

    let actor: Actor = resolve(persistence, requester_username)?;
    require_tender_representative(
        persistence,
        &actor,
        tender_id,
        "read reviews for this tender",
    )?;

    let reviews = persistence
        .list_feedback_by_author(author_username, page)
        .map_err(translate_persistence_error)?;

    debug!(
        tender_id = %tender_id,
        author = author_username,
        requester = %actor.username,
        count = reviews.len(),
        "Listed reviews"
    );
    Ok(reviews.into_iter().map(FeedbackResponse::from).collect())
}
