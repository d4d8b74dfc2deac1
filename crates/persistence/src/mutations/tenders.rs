// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender mutations.
//!
//! Everything after creation goes through the versioned write path:
//! snapshot the live row, write, bump `version`. Rollback is the exception:
//! it restores the snapshot's version number instead of bumping.
//!
//! Callers run each function inside a transaction.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::data_models::{TenderHistoryRow, TenderRow};
use crate::diesel_schema::{tender, tender_history};
use crate::error::PersistenceError;
use crate::mutations::{new_id, now_timestamp};
use crate::queries::tenders::{get_tender_history_row, get_tender_row};
use tender_market_domain::{NewTender, Tender, TenderId, TenderPatch, TenderStatus};

/// Diesel changeset for sparse tender edits. `None` fields are skipped.
#[derive(AsChangeset)]
#[diesel(table_name = tender)]
struct TenderChangeset<'a> {
    name: Option<&'a str>,
    description: Option<&'a str>,
    service_type: Option<&'static str>,
}

/// Writes the live row into history at its current version.
fn snapshot(conn: &mut SqliteConnection, row: &TenderRow) -> Result<(), PersistenceError> {
    let history: TenderHistoryRow = row.to_history();
    diesel::replace_into(tender_history::table)
        .values(&history)
        .execute(conn)?;
    debug!(tender_id = %row.id, version = row.version, "Tender snapshot written");
    Ok(())
}

/// Creates a tender at version 1 with status `Created`.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if the organization does not exist.
pub fn create_tender(
    conn: &mut SqliteConnection,
    new_tender: &NewTender,
) -> Result<Tender, PersistenceError> {
    let row = TenderRow {
        id: new_id(),
        name: new_tender.name.clone(),
        description: new_tender.description.clone(),
        service_type: new_tender.service_type.as_str().to_string(),
        status: TenderStatus::Created.as_str().to_string(),
        organization_id: new_tender.organization_id.as_str().to_string(),
        creator_username: new_tender.creator_username.clone(),
        version: 1,
        created_at: now_timestamp()?,
    };

    diesel::insert_into(tender::table)
        .values(&row)
        .execute(conn)?;

    info!(tender_id = %row.id, organization_id = %row.organization_id, "Tender created");
    row.try_into()
}

/// Sets a tender's status.
///
/// When `require_creator` is given, only a tender created by that username
/// matches; any other tender is reported as not found.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no matching tender exists.
pub fn set_tender_status(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
    status: TenderStatus,
    require_creator: Option<&str>,
) -> Result<Tender, PersistenceError> {
    let row: TenderRow = get_tender_row(conn, tender_id)?;
    if let Some(creator) = require_creator.filter(|creator| row.creator_username != *creator) {
        return Err(PersistenceError::NotFound(format!(
            "Tender {tender_id} created by '{creator}'"
        )));
    }

    snapshot(conn, &row)?;

    diesel::update(tender::table.find(tender_id.as_str()))
        .set((
            tender::status.eq(status.as_str()),
            tender::version.eq(tender::version + 1),
        ))
        .execute(conn)?;

    info!(%tender_id, status = status.as_str(), "Tender status changed");
    get_tender_row(conn, tender_id)?.try_into()
}

/// Applies a sparse edit to a tender.
///
/// # Errors
///
/// Returns `NoFieldsToUpdate` for an empty patch, without touching the row,
/// or `NotFound` if the tender does not exist.
pub fn patch_tender(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
    patch: &TenderPatch,
) -> Result<Tender, PersistenceError> {
    if patch.is_empty() {
        return Err(PersistenceError::NoFieldsToUpdate);
    }

    let row: TenderRow = get_tender_row(conn, tender_id)?;
    snapshot(conn, &row)?;

    let changes = TenderChangeset {
        name: patch.name.as_deref(),
        description: patch.description.as_deref(),
        service_type: patch.service_type.map(|s| s.as_str()),
    };

    diesel::update(tender::table.find(tender_id.as_str()))
        .set((changes, tender::version.eq(tender::version + 1)))
        .execute(conn)?;

    info!(%tender_id, from_version = row.version, "Tender edited");
    get_tender_row(conn, tender_id)?.try_into()
}

/// Restores a tender to a previous version.
///
/// The live row is snapshotted first, so the version being replaced stays
/// restorable. The restored row keeps the snapshot's `version` and
/// `created_at`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the tender or the target version
/// does not exist.
pub fn rollback_tender(
    conn: &mut SqliteConnection,
    tender_id: &TenderId,
    version: i32,
) -> Result<Tender, PersistenceError> {
    let current: TenderRow = get_tender_row(conn, tender_id)?;
    snapshot(conn, &current)?;
    let target: TenderHistoryRow = get_tender_history_row(conn, tender_id, version)?;

    diesel::update(tender::table.find(tender_id.as_str()))
        .set((
            tender::name.eq(&target.name),
            tender::description.eq(&target.description),
            tender::service_type.eq(&target.service_type),
            tender::status.eq(&target.status),
            tender::organization_id.eq(&target.organization_id),
            tender::creator_username.eq(&target.creator_username),
            tender::version.eq(target.version),
            tender::created_at.eq(&target.created_at),
        ))
        .execute(conn)?;

    info!(%tender_id, from_version = current.version, to_version = version, "Tender rolled back");
    get_tender_row(conn, tender_id)?.try_into()
}
