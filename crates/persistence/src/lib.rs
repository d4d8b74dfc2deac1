// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the tender marketplace.
//!
//! This crate stores employees, organizations, tenders, bids, votes and
//! reviews in `SQLite` through Diesel. It implements the store traits the
//! core crate defines (`IdentityDirectory`, `DecisionLedger`), so the
//! marketplace rules never see a connection.
//!
//! ## Versioned Entities
//!
//! Tenders and bids carry a `version` that starts at 1. Status changes and
//! edits snapshot the live row into `tender_history` / `bid_history` and
//! bump the version. Rollback copies a snapshot back, version included.
//! Each of these runs in its own transaction.
//!
//! ## Testing Philosophy
//!
//! - Tests run against `Persistence::new_in_memory()`
//! - Every in-memory instance is an isolated database
//! - Migrations run on every connection, so the schema is always current

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tender_market::{IdentityDirectory, WorkflowError};
use tender_market_domain::{
    Bid, BidId, BidPatch, BidStatus, Employee, Feedback, NewBid, NewTender, Organization,
    OrganizationId, OrganizationType, Page, ServiceType, Tender, TenderId, TenderPatch,
    TenderStatus, UserId,
};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod ledger;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::MIGRATIONS;
pub use data_models::BidOwnership;
pub use error::PersistenceError;
pub use ledger::SqliteLedger;

/// Aborts a decision transaction, carrying either a database failure or a
/// rule refusal out of the closure.
enum LedgerAbort {
    Database(diesel::result::Error),
    Workflow(WorkflowError<PersistenceError>),
}

impl From<diesel::result::Error> for LedgerAbort {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

/// Persistence adapter for the marketplace.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so instances never
    /// see each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the username is already taken.
    pub fn create_employee(
        &mut self,
        username: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Employee, PersistenceError> {
        mutations::directory::create_employee(&mut self.conn, username, first_name, last_name)
    }

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_organization(
        &mut self,
        name: &str,
        description: Option<&str>,
        organization_type: OrganizationType,
    ) -> Result<Organization, PersistenceError> {
        mutations::directory::create_organization(
            &mut self.conn,
            name,
            description,
            organization_type,
        )
    }

    /// Makes a user a representative of an organization.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the user already represents an
    /// organization, or `ForeignKeyViolation` if either id is unknown.
    pub fn assign_representative(
        &mut self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<(), PersistenceError> {
        mutations::directory::assign_representative(&mut self.conn, organization_id, user_id)
    }

    /// Finds the user id for a username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_user_id_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserId>, PersistenceError> {
        queries::directory::find_user_id_by_username(&mut self.conn, username)
    }

    /// Finds the organization a user represents.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_organization_by_representative(
        &mut self,
        user_id: &UserId,
    ) -> Result<Option<OrganizationId>, PersistenceError> {
        queries::directory::find_organization_by_representative(&mut self.conn, user_id)
    }

    /// Counts the representatives of an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_representatives(
        &mut self,
        organization_id: &OrganizationId,
    ) -> Result<u32, PersistenceError> {
        queries::directory::count_representatives(&mut self.conn, organization_id)
    }

    /// Returns true if an employee with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn employee_exists(&mut self, user_id: &UserId) -> Result<bool, PersistenceError> {
        queries::directory::employee_exists(&mut self.conn, user_id)
    }

    /// Returns true if an organization with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn organization_exists(
        &mut self,
        organization_id: &OrganizationId,
    ) -> Result<bool, PersistenceError> {
        queries::directory::organization_exists(&mut self.conn, organization_id)
    }

    // ========================================================================
    // Tenders
    // ========================================================================

    /// Creates a tender at version 1.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the organization does not exist.
    pub fn create_tender(&mut self, new_tender: &NewTender) -> Result<Tender, PersistenceError> {
        mutations::tenders::create_tender(&mut self.conn, new_tender)
    }

    /// Loads a tender.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tender does not exist.
    pub fn get_tender(&mut self, tender_id: &TenderId) -> Result<Tender, PersistenceError> {
        queries::tenders::get_tender(&mut self.conn, tender_id)
    }

    /// Lists tenders ordered by name. An empty filter lists every tender.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_tenders(
        &mut self,
        service_types: &[ServiceType],
        page: Page,
    ) -> Result<Vec<Tender>, PersistenceError> {
        queries::tenders::list_tenders(&mut self.conn, service_types, page)
    }

    /// Lists tenders created by a username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_tenders_by_creator(
        &mut self,
        username: &str,
        page: Page,
    ) -> Result<Vec<Tender>, PersistenceError> {
        queries::tenders::list_tenders_by_creator(&mut self.conn, username, page)
    }

    /// Returns a tender's owning organization and status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tender does not exist.
    pub fn get_tender_owner_and_status(
        &mut self,
        tender_id: &TenderId,
    ) -> Result<(OrganizationId, TenderStatus), PersistenceError> {
        queries::tenders::get_tender_owner_and_status(&mut self.conn, tender_id)
    }

    /// Sets a tender's status, snapshotting the previous version.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tender does not exist or, when
    /// `require_creator` is given, was created by someone else.
    pub fn set_tender_status(
        &mut self,
        tender_id: &TenderId,
        status: TenderStatus,
        require_creator: Option<&str>,
    ) -> Result<Tender, PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::tenders::set_tender_status(conn, tender_id, status, require_creator)
        })
    }

    /// Applies a sparse edit to a tender.
    ///
    /// # Errors
    ///
    /// Returns `NoFieldsToUpdate` for an empty patch or `NotFound` if the
    /// tender does not exist.
    pub fn patch_tender(
        &mut self,
        tender_id: &TenderId,
        patch: &TenderPatch,
    ) -> Result<Tender, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::tenders::patch_tender(conn, tender_id, patch))
    }

    /// Restores a tender to a previous version.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tender or version does not exist.
    pub fn rollback_tender(
        &mut self,
        tender_id: &TenderId,
        version: i32,
    ) -> Result<Tender, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::tenders::rollback_tender(conn, tender_id, version))
    }

    /// Returns true if the tender belongs to the organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn confirm_tender_owner(
        &mut self,
        tender_id: &TenderId,
        organization_id: &OrganizationId,
    ) -> Result<bool, PersistenceError> {
        queries::tenders::confirm_tender_owner(&mut self.conn, tender_id, organization_id)
    }

    // ========================================================================
    // Bids
    // ========================================================================

    /// Creates a bid at version 1.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the tender does not exist.
    pub fn create_bid(&mut self, new_bid: &NewBid) -> Result<Bid, PersistenceError> {
        mutations::bids::create_bid(&mut self.conn, new_bid)
    }

    /// Loads a bid.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bid does not exist.
    pub fn get_bid(&mut self, bid_id: &BidId) -> Result<Bid, PersistenceError> {
        queries::bids::get_bid(&mut self.conn, bid_id)
    }

    /// Lists bids made against a tender.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_bids_by_tender(
        &mut self,
        tender_id: &TenderId,
        page: Page,
    ) -> Result<Vec<Bid>, PersistenceError> {
        queries::bids::list_bids_by_tender(&mut self.conn, tender_id, page)
    }

    /// Lists bids authored by a user or the user's organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_bids_by_author(
        &mut self,
        user_id: &UserId,
        organization_id: Option<&OrganizationId>,
        page: Page,
    ) -> Result<Vec<Bid>, PersistenceError> {
        queries::bids::list_bids_by_author(&mut self.conn, user_id, organization_id, page)
    }

    /// Returns a bid's status, tender and author.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bid does not exist.
    pub fn get_bid_status_owner_tender(
        &mut self,
        bid_id: &BidId,
    ) -> Result<BidOwnership, PersistenceError> {
        queries::bids::get_bid_status_owner_tender(&mut self.conn, bid_id)
    }

    /// Sets a bid's status, snapshotting the previous version.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bid does not exist.
    pub fn set_bid_status(
        &mut self,
        bid_id: &BidId,
        status: BidStatus,
    ) -> Result<Bid, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::bids::set_bid_status(conn, bid_id, status))
    }

    /// Applies a sparse edit to a bid.
    ///
    /// # Errors
    ///
    /// Returns `NoFieldsToUpdate` for an empty patch or `NotFound` if the
    /// bid does not exist.
    pub fn patch_bid(&mut self, bid_id: &BidId, patch: &BidPatch) -> Result<Bid, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::bids::patch_bid(conn, bid_id, patch))
    }

    /// Restores a bid to a previous version.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bid or version does not exist.
    pub fn rollback_bid(&mut self, bid_id: &BidId, version: i32) -> Result<Bid, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::bids::rollback_bid(conn, bid_id, version))
    }

    /// Returns a bid's author id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bid does not exist.
    pub fn get_bid_author_id(&mut self, bid_id: &BidId) -> Result<String, PersistenceError> {
        queries::bids::get_bid_author_id(&mut self.conn, bid_id)
    }

    /// Returns the tender a bid belongs to.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bid does not exist.
    pub fn get_bid_tender_id(&mut self, bid_id: &BidId) -> Result<TenderId, PersistenceError> {
        queries::bids::get_bid_tender_id(&mut self.conn, bid_id)
    }

    // ========================================================================
    // Decisions
    // ========================================================================

    /// Runs `body` against a vote ledger inside one `IMMEDIATE` transaction.
    ///
    /// The transaction commits only if `body` returns `Ok`. A rule refusal
    /// or a store failure rolls back every write the body made.
    ///
    /// # Errors
    ///
    /// Returns whatever `body` returns, or a store error if the transaction
    /// itself cannot begin or commit.
    pub fn decision_transaction<T, F>(
        &mut self,
        body: F,
    ) -> Result<T, WorkflowError<PersistenceError>>
    where
        F: FnOnce(&mut SqliteLedger<'_>) -> Result<T, WorkflowError<PersistenceError>>,
    {
        let result: Result<T, LedgerAbort> = self.conn.immediate_transaction(|conn| {
            let mut ledger = SqliteLedger::new(conn);
            body(&mut ledger).map_err(LedgerAbort::Workflow)
        });

        match result {
            Ok(value) => Ok(value),
            Err(LedgerAbort::Workflow(err)) => Err(err),
            Err(LedgerAbort::Database(err)) => Err(WorkflowError::Store(err.into())),
        }
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    /// Appends a review keyed by its writer's username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn append_feedback(
        &mut self,
        author_username: &str,
        description: &str,
    ) -> Result<Feedback, PersistenceError> {
        mutations::feedback::append_feedback(&mut self.conn, author_username, description)
    }

    /// Lists reviews written by a username, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_feedback_by_author(
        &mut self,
        author_username: &str,
        page: Page,
    ) -> Result<Vec<Feedback>, PersistenceError> {
        queries::feedback::list_feedback_by_author(&mut self.conn, author_username, page)
    }
}

impl IdentityDirectory for Persistence {
    type Error = PersistenceError;

    fn find_user_id(&mut self, username: &str) -> Result<Option<UserId>, Self::Error> {
        self.find_user_id_by_username(username)
    }

    fn find_organization(
        &mut self,
        user_id: &UserId,
    ) -> Result<Option<OrganizationId>, Self::Error> {
        self.find_organization_by_representative(user_id)
    }
}
