// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender workflow.

use tender_market::{Actor, authorize_tender_owner};
use tender_market_domain::{
    NewTender, OrganizationId, Page, ServiceType, TenderId, TenderPatch, TenderStatus,
    validate_new_tender, validate_version,
};
use tender_market_persistence::Persistence;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_lookup_error,
    translate_persistence_error,
};
use crate::request_response::{CreateTenderRequest, EditTenderRequest, TenderResponse};
use crate::{parse_uuid, resolve};

/// Resolves the caller and checks that their organization owns the tender.
///
/// Unaffiliated callers get `NoOrganization`; affiliated callers from
/// another organization get `Forbidden`.
fn resolve_tender_owner(
    persistence: &mut Persistence,
    tender_id: &TenderId,
    username: &str,
    action: &str,
) -> Result<Actor, ApiError> {
    let actor: Actor = resolve(persistence, username)?;
    actor.require_organization().map_err(translate_core_error)?;

    let (owner, _status): (OrganizationId, TenderStatus) = persistence
        .get_tender_owner_and_status(tender_id)
        .map_err(|e| translate_lookup_error("Tender", e))?;
    authorize_tender_owner(&actor, &owner, action).map_err(translate_core_error)?;

    Ok(actor)
}

/// Creates a tender.
///
/// This function:
/// - Validates the request fields
/// - Resolves the creator and requires them to represent the organization
/// - Stores the tender at version 1 with status `Created`
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The tender to create
///
/// # Errors
///
/// Returns an error if:
/// - A field is invalid (`InvalidInput`)
/// - The creator is unknown (`UnknownUser`)
/// - The creator represents no organization (`NoOrganization`)
/// - The creator represents a different organization (`Forbidden`)
pub fn create_tender(
    persistence: &mut Persistence,
    request: CreateTenderRequest,
) -> Result<TenderResponse, ApiError> {
    let service_type: ServiceType = request
        .service_type
        .parse()
        .map_err(translate_domain_error)?;
    let organization_id =
        OrganizationId::new(parse_uuid("organizationId", &request.organization_id)?);

    let new_tender = NewTender {
        name: request.name,
        description: request.description,
        service_type,
        organization_id,
        creator_username: request.creator_username,
    };
    validate_new_tender(&new_tender).map_err(translate_domain_error)?;

    let actor: Actor = resolve(persistence, &new_tender.creator_username)?;
    actor.require_organization().map_err(translate_core_error)?;
    authorize_tender_owner(
        &actor,
        &new_tender.organization_id,
        "create tenders for this organization",
    )
    .map_err(translate_core_error)?;

    let tender = persistence
        .create_tender(&new_tender)
        .map_err(translate_persistence_error)?;

    info!(
        tender_id = %tender.id,
        organization_id = %tender.organization_id,
        creator = %tender.creator_username,
        "Created tender"
    );
    Ok(tender.into())
}

/// Lists tenders, optionally restricted to a comma-separated set of
/// service types. No identity is required.
///
/// # Errors
///
/// Returns `InvalidInput` if a service type is unknown.
pub fn list_tenders(
    persistence: &mut Persistence,
    service_types: Option<&str>,
    page: Page,
) -> Result<Vec<TenderResponse>, ApiError> {
    let filter: Vec<ServiceType> = match service_types {
        Some(raw) => ServiceType::parse_list(raw).map_err(translate_domain_error)?,
        None => Vec::new(),
    };

    let tenders = persistence
        .list_tenders(&filter, page)
        .map_err(translate_persistence_error)?;

    debug!(count = tenders.len(), "Listed tenders");
    Ok(tenders.into_iter().map(TenderResponse::from).collect())
}

/// Lists the tenders created by `username`.
///
/// # Errors
///
/// Returns `UnknownUser` if the username does not resolve.
pub fn list_my_tenders(
    persistence: &mut Persistence,
    username: &str,
    page: Page,
) -> Result<Vec<TenderResponse>, ApiError> {
    let actor: Actor = resolve(persistence, username)?;
    let tenders = persistence
        .list_tenders_by_creator(&actor.username, page)
        .map_err(translate_persistence_error)?;

    debug!(username = %actor.username, count = tenders.len(), "Listed own tenders");
    Ok(tenders.into_iter().map(TenderResponse::from).collect())
}

/// Returns a tender's status. No identity is required.
///
/// # Errors
///
/// Returns `NotFound` if the tender does not exist.
pub fn get_tender_status(
    persistence: &mut Persistence,
    tender_id: &TenderId,
) -> Result<TenderStatus, ApiError> {
    let (_owner, status) = persistence
        .get_tender_owner_and_status(tender_id)
        .map_err(|e| translate_lookup_error("Tender", e))?;
    Ok(status)
}

/// Changes a tender's status.
///
/// Any status in the vocabulary may be set, including `Closed`. The change
/// is versioned like an edit.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `tender_id` - The tender to change
/// * `status` - The new status as supplied by the caller
/// * `username` - The caller
///
/// # Errors
///
/// Returns an error if:
/// - The status is unknown (`InvalidStatus`)
/// - The caller is unknown or unaffiliated (`UnknownUser`, `NoOrganization`)
/// - The tender does not exist (`NotFound`)
/// - The caller's organization does not own the tender (`Forbidden`)
pub fn update_tender_status(
    persistence: &mut Persistence,
    tender_id: &TenderId,
    status: &str,
    username: &str,
) -> Result<TenderResponse, ApiError> {
    let status: TenderStatus = status.parse().map_err(translate_domain_error)?;
    let actor = resolve_tender_owner(persistence, tender_id, username, "change tender status")?;

    let tender = persistence
        .set_tender_status(tender_id, status, None)
        .map_err(|e| translate_lookup_error("Tender", e))?;

    info!(
        tender_id = %tender.id,
        status = %tender.status,
        version = tender.version,
        username = %actor.username,
        "Changed tender status"
    );
    Ok(tender.into())
}

/// Applies a sparse edit to a tender.
///
/// # Errors
///
/// Returns an error if:
/// - A supplied field is invalid (`InvalidInput`)
/// - The caller is unknown or unaffiliated (`UnknownUser`, `NoOrganization`)
/// - The tender does not exist (`NotFound`)
/// - The caller's organization does not own the tender (`Forbidden`)
/// - No field was supplied (`NoSuggestionToUpdate`)
pub fn edit_tender(
    persistence: &mut Persistence,
    tender_id: &TenderId,
    request: EditTenderRequest,
    username: &str,
) -> Result<TenderResponse, ApiError> {
    let service_type: Option<ServiceType> = request
        .service_type
        .as_deref()
        .map(str::parse::<ServiceType>)
        .transpose()
        .map_err(translate_domain_error)?;
    let patch = TenderPatch {
        name: request.name,
        description: request.description,
        service_type,
    };
    patch.validate().map_err(translate_domain_error)?;

    let actor = resolve_tender_owner(persistence, tender_id, username, "edit this tender")?;

    let tender = persistence
        .patch_tender(tender_id, &patch)
        .map_err(|e| translate_lookup_error("Tender", e))?;

    info!(
        tender_id = %tender.id,
        version = tender.version,
        username = %actor.username,
        "Edited tender"
    );
    Ok(tender.into())
}

/// Restores a tender to an earlier version.
///
/// The restored row carries the target version number. The row being
/// replaced is kept in history first, so it remains restorable.
///
/// # Errors
///
/// Returns an error if:
/// - The version is not a positive integer (`InvalidInput`)
/// - The caller is unknown or unaffiliated (`UnknownUser`, `NoOrganization`)
/// - The tender or the version does not exist (`NotFound`)
/// - The caller's organization does not own the tender (`Forbidden`)
pub fn rollback_tender(
    persistence: &mut Persistence,
    tender_id: &TenderId,
    version: i64,
    username: &str,
) -> Result<TenderResponse, ApiError> {
    let version: i32 = validate_version(version).map_err(translate_domain_error)?;
    let actor = resolve_tender_owner(persistence, tender_id, username, "roll back this tender")?;

    let tender = persistence
        .rollback_tender(tender_id, version)
        .map_err(|e| translate_lookup_error("Tender version", e))?;

    info!(
        tender_id = %tender.id,
        version = tender.version,
        username = %actor.username,
        "Rolled back tender"
    );
    Ok(tender.into())
}
