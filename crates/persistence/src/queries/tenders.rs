// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{TenderHistoryRow, TenderRow};
use crate::diesel_schema::{tender, tender_history};
use crate::error::PersistenceError;
use crate::queries::page_bounds;
use tender_market_domain::{OrganizationId, Page, ServiceType, Tender, TenderId, TenderStatus};

/// Loads the live row for a tender.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the tender does not exist.
pub fn get_tender_row(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
) -> Result<TenderRow, PersistenceError> {
    tender::table
        .find(tender_id.as_str())
        .select(TenderRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Tender {tender_id}")))
}

/// Loads a tender.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the tender does not exist, or
/// `CorruptRow` if a stored value cannot be decoded.
pub fn get_tender(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
) -> Result<Tender, PersistenceError> {
    get_tender_row(conn, tender_id)?.try_into()
}

/// Lists tenders ordered by name, optionally filtered by service type.
///
/// An empty `service_types` slice disables the filter.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_tenders(
    conn: &mut SqliteConnection,
    service_types: &[ServiceType],
    page: Page,
) -> Result<Vec<Tender>, PersistenceError> {
    let (limit, offset) = page_bounds(page);
    debug!(?service_types, limit, offset, "Listing tenders");

    let mut query = tender::table
        .select(TenderRow::as_select())
        .order((tender::name.asc(), tender::id.asc()))
        .limit(limit)
        .offset(offset)
        .into_boxed();

    if !service_types.is_empty() {
        let names: Vec<&'static str> = service_types.iter().map(ServiceType::as_str).collect();
        query = query.filter(tender::service_type.eq_any(names));
    }

    query
        .load::<TenderRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_tenders: {e}")))?
        .into_iter()
        .map(Tender::try_from)
        .collect()
}

/// Lists tenders created by a username, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_tenders_by_creator(
    conn: &mut SqliteConnection,
    username: &str,
    page: Page,
) -> Result<Vec<Tender>, PersistenceError> {
    let (limit, offset) = page_bounds(page);

    tender::table
        .filter(tender::creator_username.eq(username))
        .select(TenderRow::as_select())
        .order((tender::name.asc(), tender::id.asc()))
        .limit(limit)
        .offset(offset)
        .load::<TenderRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_tenders_by_creator: {e}")))?
        .into_iter()
        .map(Tender::try_from)
        .collect()
}

/// Returns the owning organization and the current status of a tender.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the tender does not exist.
pub fn get_tender_owner_and_status(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
) -> Result<(OrganizationId, TenderStatus), PersistenceError> {
    let (organization_id, status): (String, String) = tender::table
        .find(tender_id.as_str())
        .select((tender::organization_id, tender::status))
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Tender {tender_id}")))?;

    Ok((OrganizationId::new(organization_id), status.parse()?))
}

/// Returns the current status of a tender.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the tender does not exist.
pub fn get_tender_status(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
) -> Result<TenderStatus, PersistenceError> {
    get_tender_owner_and_status(conn, tender_id).map(|(_, status)| status)
}

/// Returns true if the tender exists and belongs to the organization.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn confirm_tender_owner(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
    organization_id: &OrganizationId,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        tender::table
            .filter(tender::id.eq(tender_id.as_str()))
            .filter(tender::organization_id.eq(organization_id.as_str())),
    ))
    .get_result(conn)?)
}

/// Loads the snapshot of a tender at a version.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no snapshot exists at that version.
pub fn get_tender_history_row(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
    version: i32,
) -> Result<TenderHistoryRow, PersistenceError> {
    tender_history::table
        .find((tender_id.as_str(), version))
        .select(TenderHistoryRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Tender {tender_id} has no version {version}"))
        })
}
