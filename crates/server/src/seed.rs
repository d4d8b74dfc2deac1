// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory seeding.
//!
//! Employees, organizations and representative assignments have no HTTP
//! endpoints. A deployment loads them at startup from a JSON document:
//!
//! ```json
//! {
//!   "organizations": [{ "name": "Acme", "description": "...", "type": "LLC" }],
//!   "employees": [{ "username": "alice", "firstName": "Alice", "lastName": "Smith" }],
//!   "representatives": [{ "organization": "Acme", "username": "alice" }]
//! }
//! ```
//!
//! Identifiers are generated by the store, so representatives refer to
//! organizations by name and to employees by username.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tender_market_domain::{OrganizationId, OrganizationType, UserId};
use tender_market_persistence::{Persistence, PersistenceError};
use thiserror::Error;
use tracing::info;

/// Startup configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read seed file {path}: {source}")]
    ReadSeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed document: {0}")]
    ParseSeed(#[from] serde_json::Error),

    #[error("Seed assigns a representative to unknown organization '{0}'")]
    UnknownOrganization(String),

    #[error("Seed assigns unknown employee '{0}' as a representative")]
    UnknownEmployee(String),

    #[error("Seed lists organization '{0}' more than once")]
    DuplicateOrganization(String),

    #[error("Failed to store seed data: {0}")]
    Store(#[from] PersistenceError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedOrganization {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub organization_type: OrganizationType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEmployee {
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRepresentative {
    /// Organization name.
    pub organization: String,
    pub username: String,
}

/// The seed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub organizations: Vec<SeedOrganization>,
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
    #[serde(default)]
    pub representatives: Vec<SeedRepresentative>,
}

impl SeedData {
    /// Reads and parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid seed
    /// document.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw: String = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadSeed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Counts of records written by `apply_seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub organizations: usize,
    pub employees: usize,
    pub representatives: usize,
}

/// Writes a seed document into the store.
///
/// Records are written in dependency order: organizations, then employees,
/// then representative assignments. Seeding stops at the first failure;
/// records already written stay written.
///
/// # Errors
///
/// Returns an error if a representative names an organization or employee
/// not present in the document, or if the store rejects a record (for
/// example a duplicate username, or a user assigned to two organizations).
pub fn apply_seed(persistence: &mut Persistence, seed: &SeedData) -> Result<SeedSummary, ConfigError> {
    let mut organizations: HashMap<&str, OrganizationId> = HashMap::new();
    for org in &seed.organizations {
        if organizations.contains_key(org.name.as_str()) {
            return Err(ConfigError::DuplicateOrganization(org.name.clone()));
        }
        let created = persistence.create_organization(
            &org.name,
            org.description.as_deref(),
            org.organization_type,
        )?;
        organizations.insert(org.name.as_str(), created.id);
    }

    let mut employees: HashMap<&str, UserId> = HashMap::new();
    for employee in &seed.employees {
        let created = persistence.create_employee(
            &employee.username,
            employee.first_name.as_deref(),
            employee.last_name.as_deref(),
        )?;
        employees.insert(employee.username.as_str(), created.id);
    }

    for rep in &seed.representatives {
        let organization_id = organizations
            .get(rep.organization.as_str())
            .ok_or_else(|| ConfigError::UnknownOrganization(rep.organization.clone()))?;
        let user_id = employees
            .get(rep.username.as_str())
            .ok_or_else(|| ConfigError::UnknownEmployee(rep.username.clone()))?;
        persistence.assign_representative(organization_id, user_id)?;
    }

    let summary = SeedSummary {
        organizations: seed.organizations.len(),
        employees: seed.employees.len(),
        representatives: seed.representatives.len(),
    };
    info!(
        organizations = summary.organizations,
        employees = summary.employees,
        representatives = summary.representatives,
        "Seeded directory"
    );
    Ok(summary)
}
