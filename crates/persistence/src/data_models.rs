// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their conversions into domain entities.
//!
//! Status and classification columns are stored as their canonical text
//! form. Decoding a row re-parses them, so a value the domain no longer
//! recognizes surfaces as `PersistenceError::CorruptRow`.

use diesel::prelude::*;
use tender_market_domain::{
    AuthorType, Bid, BidId, BidStatus, Employee, Feedback, FeedbackId, Organization,
    OrganizationId, ServiceType, Tender, TenderId, TenderStatus, UserId,
};

use crate::diesel_schema::{
    bid, bid_history, employee, organization, review, tender, tender_history,
};
use crate::error::PersistenceError;

/// Diesel row struct for employees.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employee)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeRow {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
        }
    }
}

/// Diesel row struct for organizations.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = organization)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrganizationRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub organization_type: String,
    pub created_at: String,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = PersistenceError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrganizationId::new(row.id),
            name: row.name,
            description: row.description,
            organization_type: row.organization_type.parse()?,
            created_at: row.created_at,
        })
    }
}

/// Diesel row struct for the live tender table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tender)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TenderRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: String,
    pub creator_username: String,
    pub version: i32,
    pub created_at: String,
}

impl TenderRow {
    /// Copies this row into a history snapshot keyed by its current version.
    pub fn to_history(&self) -> TenderHistoryRow {
        TenderHistoryRow {
            tender_id: self.id.clone(),
            version: self.version,
            name: self.name.clone(),
            description: self.description.clone(),
            service_type: self.service_type.clone(),
            status: self.status.clone(),
            organization_id: self.organization_id.clone(),
            creator_username: self.creator_username.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

impl TryFrom<TenderRow> for Tender {
    type Error = PersistenceError;

    fn try_from(row: TenderRow) -> Result<Self, Self::Error> {
        let service_type: ServiceType = row.service_type.parse()?;
        let status: TenderStatus = row.status.parse()?;
        Ok(Self {
            id: TenderId::new(row.id),
            name: row.name,
            description: row.description,
            service_type,
            status,
            organization_id: OrganizationId::new(row.organization_id),
            creator_username: row.creator_username,
            version: row.version,
            created_at: row.created_at,
        })
    }
}

/// Diesel row struct for tender snapshots.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tender_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TenderHistoryRow {
    pub tender_id: String,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: String,
    pub creator_username: String,
    pub created_at: String,
}

/// Diesel row struct for the live bid table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bid)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BidRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tender_id: String,
    pub status: String,
    pub author_type: String,
    pub author_id: String,
    pub version: i32,
    pub created_at: String,
}

impl BidRow {
    /// Copies this row into a history snapshot keyed by its current version.
    pub fn to_history(&self) -> BidHistoryRow {
        BidHistoryRow {
            bid_id: self.id.clone(),
            version: self.version,
            name: self.name.clone(),
            description: self.description.clone(),
            tender_id: self.tender_id.clone(),
            status: self.status.clone(),
            author_type: self.author_type.clone(),
            author_id: self.author_id.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

impl TryFrom<BidRow> for Bid {
    type Error = PersistenceError;

    fn try_from(row: BidRow) -> Result<Self, Self::Error> {
        let status: BidStatus = row.status.parse()?;
        let author_type: AuthorType = row.author_type.parse()?;
        Ok(Self {
            id: BidId::new(row.id),
            name: row.name,
            description: row.description,
            tender_id: TenderId::new(row.tender_id),
            status,
            author_type,
            author_id: row.author_id,
            version: row.version,
            created_at: row.created_at,
        })
    }
}

/// Diesel row struct for bid snapshots.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bid_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BidHistoryRow {
    pub bid_id: String,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub tender_id: String,
    pub status: String,
    pub author_type: String,
    pub author_id: String,
    pub created_at: String,
}

/// Diesel row struct for reviews.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = review)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewRow {
    pub id: String,
    pub description: String,
    pub author_username: String,
    pub created_at: String,
}

impl From<ReviewRow> for Feedback {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: FeedbackId::new(row.id),
            description: row.description,
            author_username: row.author_username,
            created_at: row.created_at,
        }
    }
}

/// The facts bid authorization needs, read in one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidOwnership {
    pub status: BidStatus,
    pub tender_id: TenderId,
    pub author_id: String,
}
