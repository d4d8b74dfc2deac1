// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classification::{AuthorType, OrganizationType, ServiceType};
use crate::status::{BidStatus, TenderStatus};
use serde::{Deserialize, Serialize};

/// Generates an opaque string identifier newtype.
///
/// Identifiers are assigned by the persistence layer. The domain never
/// inspects their contents, it only compares them.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner value.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of an employee (a user account).
    UserId
);
string_id!(
    /// Identifier of an organization.
    OrganizationId
);
string_id!(
    /// Identifier of a tender.
    TenderId
);
string_id!(
    /// Identifier of a bid.
    BidId
);
string_id!(
    /// Identifier of a feedback entry.
    FeedbackId
);

/// A user account. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: UserId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: String,
}

/// An organization that publishes tenders and submits bids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub organization_type: OrganizationType,
    pub created_at: String,
}

/// A procurement request published by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    pub id: TenderId,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    /// The owning organization.
    pub organization_id: OrganizationId,
    pub creator_username: String,
    /// Starts at 1; bumped by every edit and status change.
    pub version: i32,
    pub created_at: String,
}

/// An offer made against a tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub name: String,
    pub description: String,
    pub tender_id: TenderId,
    pub status: BidStatus,
    pub author_type: AuthorType,
    /// A `UserId` or an `OrganizationId`, depending on `author_type`.
    pub author_id: String,
    pub version: i32,
    pub created_at: String,
}

/// Free-text review left by a tender owner's representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub description: String,
    pub author_username: String,
    pub created_at: String,
}

/// Fields accepted when creating a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTender {
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub organization_id: OrganizationId,
    pub creator_username: String,
}

/// Fields accepted when creating a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    pub name: String,
    pub description: String,
    pub tender_id: TenderId,
    pub author_type: AuthorType,
    pub author_id: String,
}

/// Limit/offset window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Page {
    /// Number of rows returned when the caller gives no limit.
    pub const DEFAULT_LIMIT: u32 = 5;
    /// Largest limit a caller may request.
    pub const MAX_LIMIT: u32 = 50;

    /// Builds a page from optional caller input.
    ///
    /// Missing values fall back to the defaults; a zero or oversized limit is
    /// clamped into `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
